// [libs/core/bignum-engine/src/printer.rs]
/*!
 * =================================================================
 * APARATO: DECIMAL & HEX PRINT ENGINE (V5.2 - BARRETT PIPELINE)
 * CLASIFICACIÓN: CORE CODEC (ESTRATO L1)
 * RESPONSABILIDAD: EMISIÓN TEXTUAL BIT-EXACTA DE MAGNITUDES CON SIGNO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. BARRETT BILLION: La división destructiva por 10^9 usa el recíproco
 *    ⌊2^64 / 10^9⌋ con corrección 0-o-1 sin saltos, derivada del bit de
 *    signo de r̂ - 10^9.
 * 2. FIXED-POINT DIGIT LANE: Los residuos se renderizan con divmod
 *    recíproco por 10000, 100 y 10 (multiplicaciones y desplazamientos,
 *    jamás una división de hardware).
 * 3. RIGHT-TO-LEFT FILL: Los dígitos ASCII se escriben de derecha a
 *    izquierda sobre un buffer acotado; el signo entra al final.
 *
 * # Mathematical Proof (Digit Bound):
 * B(bits) = ⌊(bits · 1292913987) / 2^32⌋ + 1, con 1292913987/2^32 una
 * cota superior estricta de log10(2); el buffer jamás queda corto.
 * =================================================================
 */

use std::fmt;

use tracing::instrument;

use crate::arithmetic::normalized_length;
use crate::big_integer::BigInt;

/// Aproximación en punto fijo 2^-32 de log10(2), estrictamente por exceso.
const LOG10_OF_2_FIXED: u64 = 1_292_913_987;

/// Base del pipeline decimal.
const BILLION: u64 = 1_000_000_000;

/// Recíproco de Barrett ⌊2^64 / 10^9⌋.
const BILLION_RECIPROCAL: u64 = 0x4_4B82_FA09;

/// Tabla de nibbles en mayúsculas.
const UPPER_NIBBLES: &[u8; 16] = b"0123456789ABCDEF";

/// Tabla de nibbles en minúsculas.
const LOWER_NIBBLES: &[u8; 16] = b"0123456789abcdef";

/// Cota superior de dígitos decimales para una magnitud de 'bits' bits.
#[inline]
#[must_use]
pub fn decimal_digit_bound(bits: u64) -> usize {
    ((bits as u128 * LOG10_OF_2_FIXED as u128) >> 32) as usize + 1
}

/**
 * Una pasada de la división destructiva por 10^9 sobre el scratch.
 *
 * Por limb (de mayor a menor): el dividendo de 64 bits se forma como
 * (resto_previo << 32) | limb; q̂ = high64(dividendo · μ); la corrección
 * 0-o-1 aplica la máscara del bit de signo de r̂ - 10^9.
 */
fn div_billion_in_place(limbs: &mut [u32], length: usize) -> (usize, u32) {
    let mut remainder: u64 = 0;
    for index in (0..length).rev() {
        let combined = (remainder << 32) | limbs[index] as u64;
        let mut q_hat = ((combined as u128 * BILLION_RECIPROCAL as u128) >> 64) as u64;
        let mut r_hat = combined - q_hat * BILLION;

        let difference = r_hat.wrapping_sub(BILLION);
        let keep_mask = ((difference as i64) >> 63) as u64;
        q_hat += !keep_mask & 1;
        r_hat = (r_hat & keep_mask) | (difference & !keep_mask);

        limbs[index] = q_hat as u32;
        remainder = r_hat;
    }
    (normalized_length(limbs, length), remainder as u32)
}

/// Divmod recíproco por 10000, exacto para todo u32.
#[inline]
fn divmod_10000(value: u32) -> (u32, u32) {
    let quotient = ((value as u64 * 3_518_437_209) >> 45) as u32;
    (quotient, value - quotient * 10_000)
}

/// Divmod recíproco por 100, exacto bajo 10000.
#[inline]
fn divmod_100(value: u32) -> (u32, u32) {
    let quotient = (value * 5243) >> 19;
    (quotient, value - quotient * 100)
}

/// Divmod recíproco por 10, exacto bajo 100.
#[inline]
fn divmod_10(value: u32) -> (u32, u32) {
    let quotient = (value * 205) >> 11;
    (quotient, value - quotient * 10)
}

/// Escribe el par de dígitos de 'value' (< 100) terminando en 'end'.
#[inline]
fn write_two_digits(buffer: &mut [u8], end: usize, value: u32) {
    let (tens, units) = divmod_10(value);
    buffer[end - 2] = b'0' + tens as u8;
    buffer[end - 1] = b'0' + units as u8;
}

/// Escribe los cuatro dígitos de 'value' (< 10000) terminando en 'end'.
#[inline]
fn write_four_digits(buffer: &mut [u8], end: usize, value: u32) {
    let (high_pair, low_pair) = divmod_100(value);
    write_two_digits(buffer, end, low_pair);
    write_two_digits(buffer, end - 2, high_pair);
}

/// Emite un residuo de 10^9 como 9 dígitos justificados a la derecha.
fn write_nine_digits(buffer: &mut [u8], end: usize, residue: u32) {
    let (upper, low_four) = divmod_10000(residue);
    let (top_digit, mid_four) = divmod_10000(upper);
    write_four_digits(buffer, end, low_four);
    write_four_digits(buffer, end - 4, mid_four);
    buffer[end - 9] = b'0' + top_digit as u8;
}

/**
 * Emite el residuo final (<= 10 dígitos) sin ceros a la izquierda.
 * Retorna la posición inicial de lo escrito.
 */
fn write_final_digits(buffer: &mut [u8], end: usize, residue: u32) -> usize {
    let mut position = end;
    let mut value = residue;
    while value >= 10_000 {
        let (quotient, low_four) = divmod_10000(value);
        write_four_digits(buffer, position, low_four);
        position -= 4;
        value = quotient;
    }
    if value >= 100 {
        let (quotient, low_pair) = divmod_100(value);
        write_two_digits(buffer, position, low_pair);
        position -= 2;
        value = quotient;
    }
    if value >= 10 {
        write_two_digits(buffer, position, value);
        position - 2
    } else {
        buffer[position - 1] = b'0' + value as u8;
        position - 1
    }
}

/**
 * Render decimal completo: copia la magnitud a un scratch destructivo,
 * la reduce por 10^9 y emite los residuos de derecha a izquierda.
 */
#[instrument(level = "trace", skip(value), fields(bits = value.bit_length()))]
pub(crate) fn to_decimal_string(value: &BigInt) -> String {
    if value.is_zero() {
        return "0".to_owned();
    }
    let negative = value.is_negative();
    let capacity = decimal_digit_bound(value.bit_length()) + usize::from(negative);
    let mut buffer = vec![0u8; capacity];

    let mut scratch = value.magnitude_limbs().to_vec();
    let mut scratch_len = scratch.len();
    let mut position = capacity;

    while scratch_len > 1 {
        let (reduced_len, residue) = div_billion_in_place(&mut scratch, scratch_len);
        scratch_len = reduced_len;
        write_nine_digits(&mut buffer, position, residue);
        position -= 9;
    }
    position = write_final_digits(&mut buffer, position, scratch[0]);

    if negative {
        position -= 1;
        buffer[position] = b'-';
    }
    String::from_utf8(buffer[position..].to_vec()).expect("ASCII digit buffer")
}

/**
 * Descriptor de formato hexadecimal: prefijo, sufijo, anchura mínima en
 * nibbles y caja. El valor por defecto replica el contrato "0x" + caja
 * alta del motor.
 */
#[derive(Debug, Clone)]
pub struct HexFormat {
    /// Prefijo emitido tras el signo (por defecto "0x").
    pub prefix: String,
    /// Sufijo emitido tras el último nibble.
    pub suffix: String,
    /// Anchura mínima en nibbles, rellenada con ceros a la izquierda.
    pub min_digits: usize,
    /// Caja de los dígitos A..F.
    pub uppercase: bool,
}

impl Default for HexFormat {
    fn default() -> Self {
        Self {
            prefix: "0x".to_owned(),
            suffix: String::new(),
            min_digits: 1,
            uppercase: true,
        }
    }
}

/**
 * Render hexadecimal de la magnitud: signo, prefijo y nibbles del más
 * significativo al menos significativo. Un negativo emite '-' seguido de
 * la magnitud sin signo, jamás complemento a dos (contrato registrado).
 */
pub(crate) fn to_hex_string(value: &BigInt, format: &HexFormat) -> String {
    let bits = value.bit_length();
    let nibble_count = (bits.div_ceil(4) as usize).max(format.min_digits).max(1);
    let table = if format.uppercase {
        UPPER_NIBBLES
    } else {
        LOWER_NIBBLES
    };

    let limbs = value.magnitude_limbs();
    let mut rendered = String::with_capacity(
        usize::from(value.is_negative()) + format.prefix.len() + nibble_count + format.suffix.len(),
    );
    if value.is_negative() {
        rendered.push('-');
    }
    rendered.push_str(&format.prefix);
    for nibble_index in (0..nibble_count).rev() {
        let limb_index = nibble_index / 8;
        let nibble = if limb_index < limbs.len() {
            (limbs[limb_index] >> (4 * (nibble_index % 8))) & 0xF
        } else {
            0
        };
        rendered.push(table[nibble as usize] as char);
    }
    rendered.push_str(&format.suffix);
    rendered
}

impl BigInt {
    /// Render decimal bit-exacto (signo, sin separadores).
    #[must_use]
    pub fn to_decimal_string(&self) -> String {
        to_decimal_string(self)
    }

    /// Render hexadecimal bajo el descriptor de formato dado.
    #[must_use]
    pub fn to_hex_string(&self, format: &HexFormat) -> String {
        to_hex_string(self, format)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&to_decimal_string(self))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = HexFormat {
            prefix: if formatter.alternate() { "0x" } else { "" }.to_owned(),
            ..HexFormat::default()
        };
        formatter.write_str(&to_hex_string(self, &format))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = HexFormat {
            prefix: if formatter.alternate() { "0x" } else { "" }.to_owned(),
            uppercase: false,
            ..HexFormat::default()
        };
        formatter.write_str(&to_hex_string(self, &format))
    }
}
