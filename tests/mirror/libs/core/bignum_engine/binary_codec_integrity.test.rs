// [tests/mirror/libs/core/bignum_engine/binary_codec_integrity.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DEL CODEC BINARIO (V3.2 - DUAL ENDIAN)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE-MIRROR
 * RESPONSABILIDAD: COMPLEMENTO A DOS, EXTENSIÓN DE SIGNO Y VISTAS DE LIMBS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FOUR-WAY ROUND TRIP: from_bytes(to_bytes(x)) == x para las cuatro
 *    combinaciones (complemento, endianness).
 * 2. MINIMAL LENGTH LAW: longitud mínima siempre >= 1, con el descuento
 *    de potencia de dos para magnitudes negativas exactas.
 * 3. SIGN EXTENSION: longitudes solicitadas mayores rellenan con 0x00 o
 *    0xFF según la polaridad.
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
     * CERTIFICACIÓN: vectores canónicos del complemento a dos big-endian.
     */
    #[test]
    fn certify_canonical_vectors() {
        println!("\n💾 [INICIO]: Vectores canónicos del complemento a dos...");
        let vectors: [(i64, &[u8]); 10] = [
            (0, &[0x00]),
            (1, &[0x01]),
            (-1, &[0xFF]),
            (127, &[0x7F]),
            (128, &[0x00, 0x80]),
            (-128, &[0x80]),
            (-129, &[0xFF, 0x7F]),
            (255, &[0x00, 0xFF]),
            (-255, &[0xFF, 0x01]),
            (-256, &[0xFF, 0x00]),
        ];
        for (value, expected) in vectors {
            let encoded = BigInt::from(value).to_twos_complement_bytes_be();
            assert_eq!(
                encoded.as_slice(),
                expected,
                "complemento a dos de {} corrupto (obtuve {})",
                value,
                hex::encode(&encoded)
            );
        }
        println!("   ✅ Vectores certificados.");
    }

    /**
     * CERTIFICACIÓN: ida y vuelta sobre las cuatro combinaciones.
     */
    #[test]
    fn certify_four_way_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x4D41_474E_4F40);
        let mut corpus = vec![
            BigInt::zero(),
            BigInt::one(),
            BigInt::from(-1i64),
            BigInt::from(i64::MIN),
            BigInt::from(u64::MAX),
            BigInt::one() << 255u32,
            -(BigInt::one() << 128u32),
        ];
        for round in 0..80 {
            corpus.push(random_value(&mut rng, 1 + round % 9, round % 2 == 0));
        }

        for value in &corpus {
            for &twos_complement in &[true, false] {
                if !twos_complement && value.is_negative() {
                    // La vista de magnitud pura no codifica el signo.
                    continue;
                }
                for &big_endian in &[true, false] {
                    let length = value.minimal_binary_length(twos_complement);
                    let mut buffer = vec![0u8; length];
                    let written = value
                        .to_binary_bytes(twos_complement, big_endian, &mut buffer, 0, 0)
                        .expect("buffer dimensionado");
                    assert_eq!(written, length);
                    let decoded = BigInt::from_binary_bytes(&buffer, twos_complement, big_endian);
                    assert_eq!(
                        &decoded, value,
                        "round trip ({}, {}) divergente",
                        twos_complement, big_endian
                    );
                }
            }
        }
    }

    /**
     * CERTIFICACIÓN: extensión de signo, offsets y catálogo de fallos.
     */
    #[test]
    fn certify_sign_extension_and_windows() {
        let minus_two = BigInt::from(-2i64);

        // Longitud solicitada mayor: extensión 0xFF.
        let mut extended = vec![0u8; 6];
        let written = minus_two
            .to_binary_bytes(true, true, &mut extended, 0, 6)
            .expect("ventana suficiente");
        assert_eq!(written, 6);
        assert_eq!(extended.as_slice(), &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]);

        // Positivo extendido con 0x00, little-endian.
        let five = BigInt::from(5u32);
        let mut padded = vec![0xAAu8; 4];
        five.to_binary_bytes(true, false, &mut padded, 0, 4)
            .expect("ventana suficiente");
        assert_eq!(padded.as_slice(), &[0x05, 0x00, 0x00, 0x00]);

        // Escritura con offset: los bytes fuera de la ventana sobreviven.
        let mut shared = vec![0x77u8; 8];
        five.to_binary_bytes(true, true, &mut shared, 3, 2)
            .expect("ventana suficiente");
        assert_eq!(shared.as_slice(), &[0x77, 0x77, 0x77, 0x00, 0x05, 0x77, 0x77, 0x77]);

        // Fallos: longitud por debajo de la mínima y ventana desbordada.
        let wide = BigInt::from(u64::MAX);
        let mut short_buffer = vec![0u8; 16];
        assert_eq!(
            wide.to_binary_bytes(true, true, &mut short_buffer, 0, 3),
            Err(BigNumError::OutOfRange("requested length below minimal"))
        );
        let mut tiny_buffer = vec![0u8; 4];
        assert_eq!(
            wide.to_binary_bytes(true, true, &mut tiny_buffer, 0, 0),
            Err(BigNumError::OutOfRange("output buffer window overflow"))
        );
    }

    /**
     * CERTIFICACIÓN: vistas de limbs de 32 y 64 bits de la magnitud.
     */
    #[test]
    fn certify_limb_views() {
        let value = BigInt::from_hex_str("0xAAAA_BBBB_CCCC_DDDD_EEEE_FFFF").expect("hex");
        assert_eq!(
            value.to_u32_limb_array(),
            vec![0xEEEE_FFFF, 0xCCCC_DDDD, 0xAAAA_BBBB]
        );
        assert_eq!(
            value.to_u64_limb_array(),
            vec![0xCCCC_DDDD_EEEE_FFFF, 0xAAAA_BBBB]
        );
        assert!(BigInt::zero().to_u32_limb_array().is_empty());
        assert!(BigInt::zero().to_u64_limb_array().is_empty());

        // La vista ignora el signo: es la magnitud pura.
        let negative = BigInt::from(-5i64);
        assert_eq!(negative.to_u32_limb_array(), vec![5]);
    }
}
