// [tests/mirror/libs/core/bignum_engine/bitwise_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE BITS Y DESPLAZAMIENTOS (V3.1)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE-MIRROR
 * RESPONSABILIDAD: LEYES DE BIT, DESPLAZAMIENTOS Y MÁSCARA DE VENTANA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SHIFT IDENTITIES: (x << k) >> k == x para x no negativo y
 *    (x << k) / 2^k == x sobre la vista sin signo.
 * 2. ARITHMETIC RIGHT SHIFT: El desplazamiento de un negativo con bits
 *    descartados vivos suma uno: semántica de complemento a dos.
 * 3. WINDOW MASK: apply_bit_mask conserva [index, index + width) en su
 *    posición y fuerza el signo a no-negativo.
 * =================================================================
 */

use magno_core_bignum::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_value(rng: &mut StdRng, limbs: usize, negative: bool) -> BigInt {
    let magnitude: Vec<u32> = (0..limbs).map(|_| rng.gen()).collect();
    BigInt::from_sign_magnitude(negative, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * CERTIFICACIÓN: identidades de desplazamiento sobre magnitudes.
     */
    #[test]
    fn certify_shift_identities() {
        println!("\n🧮 [INICIO]: Identidades de desplazamiento...");
        let mut rng = StdRng::seed_from_u64(0x4D41_474E_4F20);

        for round in 0..200u32 {
            let value = random_value(&mut rng, 1 + (round % 9) as usize, false);
            let shift = round % 130;
            let round_trip = (&value << shift) >> shift;
            assert_eq!(round_trip, value, "(x << {k}) >> {k} != x", k = shift);

            // (x << k) / 2^k == x sobre la vista sin signo.
            let power = BigInt::one() << shift;
            let (quotient, remainder) = (&value << shift).div_rem(&power).expect("2^k > 0");
            assert_eq!(quotient, value);
            assert!(remainder.is_zero());
        }

        // Cruce de frontera intra-limb y multi-limb.
        let one = BigInt::one();
        assert_eq!((&one << 31u32).magnitude_limbs(), [0x8000_0000u32].as_slice());
        assert_eq!((&one << 32u32).magnitude_limbs(), [0u32, 1].as_slice());
        assert_eq!((&one << 95u32).bit_length(), 96);
        assert_eq!(&(&one << 95u32) >> 95u32, one);

        // Conteos negativos rechazados por la vía falible.
        assert_eq!(
            one.shifted_left(-1),
            Err(BigNumError::NegativeArgument("shift bit count"))
        );
        assert_eq!(
            one.shifted_right(-8),
            Err(BigNumError::NegativeArgument("shift bit count"))
        );
        println!("   ✅ Identidades certificadas.");
    }

    /**
     * CERTIFICACIÓN: semántica aritmética del desplazamiento de negativos.
     */
    #[test]
    fn certify_arithmetic_right_shift() {
        // Paridad exacta con el >> de los enteros primitivos con signo.
        for &value in &[-1i64, -2, -3, -7, -8, -9, -1024, -1025, i64::MIN + 1] {
            for shift in 0..40u32 {
                let expected = value >> shift;
                let shifted = BigInt::from(value) >> shift;
                assert_eq!(
                    i64::try_from(&shifted),
                    Ok(expected),
                    "{} >> {} divergente del primitivo",
                    value,
                    shift
                );
            }
        }
        // -1 es el punto fijo del desplazamiento aritmético.
        assert_eq!(BigInt::from(-1i64) >> 500u32, BigInt::from(-1i64));
        // Sin bits descartados vivos no hay ajuste.
        assert_eq!(BigInt::from(-4096i64) >> 12u32, BigInt::from(-1i64));
        assert_eq!(BigInt::from(-4096i64) >> 5u32, BigInt::from(-128i64));
    }

    /**
     * CERTIFICACIÓN: leyes de bit individuales sobre la magnitud.
     */
    #[test]
    fn certify_bit_laws() {
        let mut rng = StdRng::seed_from_u64(0x4D41_474E_4F21);
        for round in 0..120u32 {
            let value = random_value(&mut rng, 1 + (round % 6) as usize, false);
            let index = (round * 7 % 250) as i64;

            // test_bit(set_bit(x, i), i) == true
            let raised = value.set_bit(index).expect("índice no negativo");
            assert_eq!(raised.test_bit(index), Ok(true));

            // set_bit; clear_bit restaura cuando el bit estaba apagado.
            if value.test_bit(index) == Ok(false) {
                let restored = raised.clear_bit(index).expect("índice no negativo");
                assert_eq!(restored, value, "set+clear no restaura en ronda {}", round);
            }
        }

        // Primitivas de conteo sobre un patrón conocido.
        let pattern = BigInt::from_hex_str("0x8000_0000_0000_0001_0000").expect("hex");
        assert_eq!(pattern.bit_length(), 80);
        assert_eq!(pattern.count_one_bits(), 2);
        assert_eq!(pattern.count_trailing_zeros(), 16);
        assert_eq!(pattern.test_bit(16), Ok(true));
        assert_eq!(pattern.test_bit(79), Ok(true));
        assert_eq!(pattern.test_bit(40), Ok(false));
        assert_eq!(
            pattern.test_bit(-1),
            Err(BigNumError::NegativeArgument("bit index"))
        );

        // Ventana de 64 bits a horcajadas de tres limbs.
        let window_value = BigInt::from_hex_str("0xAAAA_BBBB_CCCC_DDDD_EEEE_FFFF").expect("hex");
        assert_eq!(
            window_value.extract_u64_at_bit_index(16),
            0xBBBB_CCCC_DDDD_EEEEu64
        );
        assert_eq!(window_value.extract_u64_at_bit_index(0), 0xCCCC_DDDD_EEEE_FFFFu64);
    }

    /**
     * CERTIFICACIÓN: escritura dispersa de bits sobre capacidad anulada.
     */
    #[test]
    fn certify_sparse_bit_writes() {
        // Siembra limbs residuales por encima de la longitud viva.
        let mut lane = Accumulator::from_operand(&((BigInt::one() << 300u32) - 1u64));
        lane.set_value(&1u32);

        // La escritura dispersa debe atravesar los limbs residuales como
        // si fueran ceros.
        lane.set_bit_in_place(200).expect("índice no negativo");
        let expected = &(BigInt::one() << 200u32) + 1u64;
        assert!(lane == expected);
        assert_eq!(lane.test_bit(200), Ok(true));
        assert_eq!(lane.test_bit(100), Ok(false));

        lane.clear_bit_in_place(200).expect("índice no negativo");
        assert!(lane == 1i64);
        assert_eq!(lane.bit_length(), 1);

        // Apagar un bit fuera de la magnitud viva es nulo.
        lane.clear_bit_in_place(5000).expect("índice no negativo");
        assert!(lane == 1i64);

        assert_eq!(
            lane.set_bit_in_place(-3),
            Err(BigNumError::NegativeArgument("bit index"))
        );
    }

    /**
     * CERTIFICACIÓN: máscara de ventana del acumulador.
     */
    #[test]
    fn certify_window_mask() {
        // width 0 colapsa a cero.
        let mut zeroed = Accumulator::from_operand(&BigInt::from(-999i64));
        zeroed.apply_bit_mask(0, 5).expect("argumentos no negativos");
        assert!(zeroed.is_zero());

        // width 1 es un test-and-set de limb único.
        let mut single = Accumulator::from_operand(&0b1010_0000u32);
        single.apply_bit_mask(1, 5).expect("argumentos no negativos");
        assert!(single == 0b10_0000u32);
        let mut single_off = Accumulator::from_operand(&0b1010_0000u32);
        single_off.apply_bit_mask(1, 6).expect("argumentos no negativos");
        assert!(single_off.is_zero());

        // Ventana general: conserva los bits en su posición.
        let source = BigInt::from_hex_str("0xFFFF_FFFF_FFFF_FFFF").expect("hex");
        let mut windowed = Accumulator::from_operand(&source);
        windowed.apply_bit_mask(8, 16).expect("argumentos no negativos");
        assert!(windowed == 0x00FF_0000u32);

        // La máscara fuerza el signo a no-negativo.
        let mut negative = Accumulator::from_operand(&BigInt::from(-0xFFi64));
        negative.apply_bit_mask(4, 0).expect("argumentos no negativos");
        assert!(negative == 0xFu32);
        assert!(!negative.is_negative());

        // Ventana más allá de la magnitud: cero.
        let mut beyond = Accumulator::from_operand(&0xFFu32);
        beyond.apply_bit_mask(32, 64).expect("argumentos no negativos");
        assert!(beyond.is_zero());

        // Argumentos negativos rechazados.
        let mut faulted = Accumulator::from_operand(&1u32);
        assert_eq!(
            faulted.apply_bit_mask(-1, 0),
            Err(BigNumError::NegativeArgument("mask width"))
        );
        assert_eq!(
            faulted.apply_bit_mask(4, -2),
            Err(BigNumError::NegativeArgument("mask index"))
        );

        // test_any_bit_in_lower_n desde el preludio del kernel.
        let limbs = [0u32, 0x10];
        assert!(!test_any_bit_in_lower_n(&limbs, 2, 36));
        assert!(test_any_bit_in_lower_n(&limbs, 2, 37));
    }
}
