// [libs/core/bignum-engine/src/binary_codec.rs]
/*!
 * =================================================================
 * APARATO: BINARY CODEC ENGINE (V3.1 - TWO'S COMPLEMENT SOVEREIGN)
 * CLASIFICACIÓN: CORE CODEC (ESTRATO L1)
 * RESPONSABILIDAD: SERIALIZACIÓN BINARIA Y VISTAS DE LIMBS DE LA MAGNITUD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STREAMING COMPLEMENT: El complemento a dos se emite como flujo
 *    little-endian: ceros hasta el primer byte vivo, su negación
 *    aritmética, negación lógica del resto y extensión de signo 0xFF.
 * 2. MINIMAL LENGTH LAW: La longitud mínima (siempre >= 1 byte) deriva de
 *    la longitud en bits del complemento, con el descuento de potencia de
 *    dos para magnitudes negativas exactas.
 * 3. DUAL ENDIAN: El orden de bytes se decide en la colocación final; la
 *    generación lógica es siempre little-endian.
 * =================================================================
 */

use crate::arithmetic::normalized_length;
use crate::big_integer::BigInt;
use crate::errors::BigNumError;

impl BigInt {
    /// Byte 'index' (little-endian) de la magnitud pura.
    #[inline]
    fn magnitude_byte(&self, index: usize) -> u8 {
        let limbs = self.magnitude_limbs();
        let limb_index = index / 4;
        if limb_index < limbs.len() {
            (limbs[limb_index] >> (8 * (index % 4))) as u8
        } else {
            0
        }
    }

    /// Verdadero si la magnitud es una potencia exacta de dos.
    fn magnitude_is_power_of_two(&self) -> bool {
        !self.is_zero() && self.count_one_bits() == 1
    }

    /**
     * Longitud binaria mínima en bytes, siempre >= 1.
     *
     * En complemento a dos, una magnitud negativa que sea potencia exacta
     * de dos ahorra un bit (−2^k cabe en k+1 bits); la vista de magnitud
     * pura solo depende de la longitud en bits.
     */
    #[must_use]
    pub fn minimal_binary_length(&self, twos_complement: bool) -> usize {
        if !twos_complement || self.is_zero() {
            return (self.bit_length().div_ceil(8) as usize).max(1);
        }
        let magnitude_bits = self.bit_length();
        let complement_bits = if self.is_negative() && self.magnitude_is_power_of_two() {
            magnitude_bits - 1
        } else {
            magnitude_bits
        };
        (complement_bits / 8) as usize + 1
    }

    /**
     * Genera los 'length' bytes lógicos little-endian del valor: magnitud
     * pura o complemento a dos con extensión de signo.
     */
    fn write_binary_bytes_le(&self, twos_complement: bool, out: &mut [u8]) {
        let value_bytes = (self.bit_length().div_ceil(8)) as usize;
        if !(twos_complement && self.is_negative()) {
            for (index, slot) in out.iter_mut().enumerate() {
                *slot = if index < value_bytes {
                    self.magnitude_byte(index)
                } else {
                    0
                };
            }
            return;
        }
        let mut seen_live_byte = false;
        for (index, slot) in out.iter_mut().enumerate() {
            if index >= value_bytes {
                *slot = 0xFF;
                continue;
            }
            let byte = self.magnitude_byte(index);
            *slot = if seen_live_byte {
                !byte
            } else if byte == 0 {
                0
            } else {
                seen_live_byte = true;
                byte.wrapping_neg()
            };
        }
    }

    /**
     * Serialización en complemento a dos, big-endian, de longitud mínima.
     */
    #[must_use]
    pub fn to_twos_complement_bytes_be(&self) -> Vec<u8> {
        let length = self.minimal_binary_length(true);
        let mut little_endian = vec![0u8; length];
        self.write_binary_bytes_le(true, &mut little_endian);
        little_endian.reverse();
        little_endian
    }

    /**
     * Escritura binaria sobre un buffer del llamador.
     *
     * 'requested_length <= 0' significa longitud mínima; una longitud
     * mayor extiende el signo. Retorna los bytes escritos.
     *
     * # Errors:
     * 'OutOfRange' si la longitud solicitada no contiene el valor o si el
     * buffer no contiene la ventana [offset, offset + longitud).
     */
    pub fn to_binary_bytes(
        &self,
        twos_complement: bool,
        big_endian: bool,
        out: &mut [u8],
        offset: usize,
        requested_length: i64,
    ) -> Result<usize, BigNumError> {
        let minimal = self.minimal_binary_length(twos_complement);
        let length = if requested_length <= 0 {
            minimal
        } else {
            requested_length as usize
        };
        if length < minimal {
            return Err(BigNumError::OutOfRange("requested length below minimal"));
        }
        if offset + length > out.len() {
            return Err(BigNumError::OutOfRange("output buffer window overflow"));
        }

        let window = &mut out[offset..offset + length];
        self.write_binary_bytes_le(twos_complement, window);
        if big_endian {
            window.reverse();
        }
        Ok(length)
    }

    /**
     * Reconstrucción desde bytes: complemento a dos (el bit alto del byte
     * más significativo decide el signo) o magnitud pura.
     */
    #[must_use]
    pub fn from_binary_bytes(bytes: &[u8], twos_complement: bool, big_endian: bool) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }
        let mut little_endian = bytes.to_vec();
        if big_endian {
            little_endian.reverse();
        }

        let negative = twos_complement && little_endian[little_endian.len() - 1] & 0x80 != 0;
        if negative {
            // Deshace el flujo de complemento: misma transformación.
            let mut seen_live_byte = false;
            for byte in little_endian.iter_mut() {
                *byte = if seen_live_byte {
                    !*byte
                } else if *byte == 0 {
                    0
                } else {
                    seen_live_byte = true;
                    byte.wrapping_neg()
                };
            }
        }

        let mut limbs = vec![0u32; little_endian.len().div_ceil(4)];
        for (index, &byte) in little_endian.iter().enumerate() {
            limbs[index / 4] |= (byte as u32) << (8 * (index % 4));
        }
        let length = normalized_length(&limbs, limbs.len());
        limbs.truncate(length);
        Self::from_sign_magnitude(negative, limbs)
    }

    /// Vista de la magnitud como arreglo de limbs u32 little-endian.
    #[must_use]
    pub fn to_u32_limb_array(&self) -> Vec<u32> {
        self.magnitude_limbs().to_vec()
    }

    /// Vista de la magnitud como arreglo de limbs u64 little-endian.
    #[must_use]
    pub fn to_u64_limb_array(&self) -> Vec<u64> {
        let limbs = self.magnitude_limbs();
        let mut wide = Vec::with_capacity(limbs.len().div_ceil(2));
        for pair in limbs.chunks(2) {
            let low = pair[0] as u64;
            let high = if pair.len() == 2 { pair[1] as u64 } else { 0 };
            wide.push(low | (high << 32));
        }
        wide
    }
}
