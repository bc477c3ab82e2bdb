// [tests/mirror/libs/core/bignum_engine/prelude_sync.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE SINCRONÍA DEL PRELUDIO (V2.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE-MIRROR
 * RESPONSABILIDAD: LA AUTORIDAD DE IMPORTACIÓN EXPONE TODA LA NOMENCLATURA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. NOMINAL EXPORT: cada símbolo soberano del motor debe resolverse
 *    desde el preludio sin importaciones auxiliares.
 * 2. SMOKE CONTRACTS: una aserción mínima por estrato confirma que el
 *    símbolo exportado es el aparato real y no un alias muerto.
 * =================================================================
 */

use magno_core_bignum::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    /**
     * CERTIFICACIÓN: todos los estratos responden desde el preludio.
     */
    #[test]
    fn certify_prelude_nominal_sync() {
        // Estrato de valor.
        let value = BigInt::from_decimal_str("98765432109876543210").expect("parse");
        assert_eq!(value.to_decimal_string(), "98765432109876543210");
        assert_eq!(SignedMeta::new(true, 3).signum(), -1);

        // Estrato de acumulación.
        let mut accumulator = Accumulator::new();
        assert_eq!(accumulator.buffer_capacity(), MINIMUM_PRIMARY_LIMBS);
        accumulator.add_assign_operand(&41i64);
        accumulator.add_assign_operand(&1u32);
        assert!(accumulator == 42i64);
        assert!(matches!(42u64.as_operand(), Operand::Small { .. }));

        // Kernel de limbs con longitudes explícitas.
        let mut sum = [0u32; 3];
        let length = add_into(&mut sum, &[u32::MAX, 1], 2, &[1], 1);
        assert_eq!(length, 2);
        assert_eq!(sum[..2], [0, 2]);
        assert_eq!(normalized_length(&[7, 0, 0], 3), 1);
        assert_eq!(compare_magnitudes(&[1, 2], 2, &[2, 1], 2), Ordering::Greater);
        assert_eq!(compare_magnitude_with_u64(&[5], 1, 6), Ordering::Less);
        assert_eq!(round_to_quantum(5), 2 * LIMB_QUANTUM);
        assert_eq!(bit_length(&[0, 1], 2), 33);
        assert_eq!(count_trailing_zeros(&[0, 8], 2), 35);
        assert_eq!(count_one_bits(&[0xF0F0], 1), 8);
        assert!(test_bit(&[4], 1, 2));
        assert_eq!(extract_u64_at_bit_index(&[0, 1], 2, 32), 1);
        assert!(test_any_bit_in_lower_n(&[1], 1, 1));

        // Desplazamientos y división del kernel.
        let mut shifted = [0u32; 3];
        assert_eq!(shift_left_into(&mut shifted, &[1], 1, 33), 2);
        assert_eq!(shifted[1], 2);
        let mut back = [0u32; 3];
        assert_eq!(shift_right_into(&mut back, &shifted, 2, 33), 1);
        assert_eq!(back[0], 1);
        let mut quotient = [0u32; 2];
        let (q_len, remainder) = div_rem_by_u32(&mut quotient, &[7, 3], 2, 2);
        assert_eq!((q_len, remainder), (2, 1));
        assert_eq!(rem_by_u32(&[7, 3], 2, 2), 1);
        assert_eq!(rem_by_u64(&[7, 3], 2, 1u64 << 33), 0x3_0000_0007 % (1u64 << 33));
        assert_eq!(
            try_div_fast_path(&[1], 1, &[1, 1], 2),
            Some(FastDivOutcome::QuotientZero)
        );
        assert!(square_scratch_length(SQUARE_KARATSUBA_THRESHOLD + 1) > 0);

        // Productos del kernel.
        let mut product = [0u32; 3];
        assert_eq!(mul_by_u32_into(&mut product, &[3], 1, 5), 1);
        assert_eq!(product[0], 15);
        let mut wide_product = [0u32; 4];
        assert_eq!(mul_by_u64_into(&mut wide_product, &[2], 1, 1u64 << 32), 2);
        assert_eq!(wide_product[1], 2);
        let mut full_product = [0u32; 2];
        assert_eq!(mul_into(&mut full_product, &[6], 1, &[7], 1), 1);
        assert_eq!(full_product[0], 42);

        // Codec textual.
        let mut source = ByteSource::new(b"0x2A");
        assert_eq!(parse_integer(&mut source).expect("parse"), BigInt::from(42u32));
        let characters: Vec<char> = "2A".chars().collect();
        let mut char_source = CharSource::new(&characters);
        assert_eq!(
            parse_hex_integer(&mut char_source).expect("parse"),
            BigInt::from(42u32)
        );
        assert!(decimal_digit_bound(64) >= 20);
        assert_eq!(
            BigInt::from(255u32).to_hex_string(&HexFormat::default()),
            "0xFF"
        );

        // Aritmética modular y primalidad.
        let mut context = ModContext::new(&BigInt::from(97u32)).expect("módulo positivo");
        let exponentiated = context
            .mod_pow(&BigInt::from(5u32), &BigInt::from(96u32))
            .expect("Fermat");
        assert_eq!(exponentiated, BigInt::one());
        assert!(is_prime_baillie_psw(&BigInt::from(97u32)));
        assert!(is_prime_u64(97));
        assert_eq!(
            jacobi_symbol(&BigInt::from(2u32), &BigInt::from(97u32)).expect("impar"),
            1
        );

        // Catálogo de fallos.
        let fault = BigInt::one().div_rem(&BigInt::zero()).expect_err("cero");
        assert_eq!(fault, BigNumError::DivisionByZero);
        assert!(fault.to_string().contains("DIVISION_BY_ZERO"));
    }
}
