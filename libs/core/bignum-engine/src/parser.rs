// [libs/core/bignum-engine/src/parser.rs]
/*!
 * =================================================================
 * APARATO: TEXTUAL PARSE ENGINE (V6.0 - LATIN-1 STREAM PROTOCOL)
 * CLASIFICACIÓN: CORE CODEC (ESTRATO L1)
 * RESPONSABILIDAD: ANÁLISIS DECIMAL Y HEXADECIMAL SOBRE FUENTES POLIMÓRFICAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CAPABILITY PROTOCOL: Las fuentes de dígitos se abstraen con un único
 *    conjunto de capacidades (next/prev/peek/has_next/remaining_len/reset)
 *    en lugar de una jerarquía de herencia.
 * 2. CHUNKED DECIMAL CORE: Los dígitos se acumulan en trozos de hasta 9
 *    (z = z · 10^k + trozo) sobre un buffer pre-dimensionado por la
 *    estimación conservadora ⌈dígitos · log₂10⌉.
 * 3. BACKWARD HEX PACKING: El núcleo hexadecimal cuenta nibbles hacia
 *    adelante y luego empaqueta 8 por limb caminando hacia atrás con
 *    'prev', del nibble menos significativo al más significativo.
 * =================================================================
 */

use std::str::FromStr;

use tracing::instrument;

use crate::arithmetic::{add_assign_u64, normalized_length};
use crate::big_integer::BigInt;
use crate::errors::BigNumError;
use crate::multiplication::mul_u32_in_place;

/// Aproximación en punto fijo 2^-30 de log2(10), estrictamente por exceso.
const LOG2_OF_10_FIXED: u64 = 3_566_893_132;

/// Potencias de diez para el cierre de trozos parciales.
const POWERS_OF_TEN: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/**
 * Protocolo de fuente de dígitos Latin-1: un cursor bidireccional sobre
 * una secuencia de bytes con reinicio explícito.
 */
pub trait DigitSource {
    /// Consume y retorna el siguiente byte, o None al agotarse.
    fn next(&mut self) -> Option<u8>;
    /// Retrocede el cursor un byte y lo retorna, o None en el origen.
    fn prev(&mut self) -> Option<u8>;
    /// Observa el siguiente byte sin consumirlo.
    fn peek(&self) -> Option<u8>;
    /// Verdadero mientras queden bytes por consumir.
    fn has_next(&self) -> bool;
    /// Bytes restantes desde el cursor hasta el final.
    fn remaining_len(&self) -> usize;
    /// Devuelve el cursor al origen de la fuente.
    fn reset(&mut self);
}

/// Fuente de dígitos sobre un slice de bytes (cadena o arreglo crudo).
#[derive(Debug)]
pub struct ByteSource<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> ByteSource<'a> {
    /// Fuente sobre el slice completo.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Fuente sobre el subrango [start, end) del slice.
    #[must_use]
    pub fn subrange(bytes: &'a [u8], start: usize, end: usize) -> Self {
        Self {
            bytes: &bytes[start..end],
            cursor: 0,
        }
    }
}

impl<'a> From<&'a str> for ByteSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl DigitSource for ByteSource<'_> {
    fn next(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.cursor).copied();
        if byte.is_some() {
            self.cursor += 1;
        }
        byte
    }

    fn prev(&mut self) -> Option<u8> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.bytes[self.cursor])
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    fn has_next(&self) -> bool {
        self.cursor < self.bytes.len()
    }

    fn remaining_len(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/**
 * Fuente de dígitos sobre un slice de chars. Los puntos de código fuera
 * del plano Latin-1 degradan a 0xFF, un byte que ningún núcleo acepta.
 */
#[derive(Debug)]
pub struct CharSource<'a> {
    characters: &'a [char],
    cursor: usize,
}

impl<'a> CharSource<'a> {
    /// Fuente sobre el slice completo de chars.
    #[must_use]
    pub fn new(characters: &'a [char]) -> Self {
        Self {
            characters,
            cursor: 0,
        }
    }

    fn latin1(character: char) -> u8 {
        let code_point = character as u32;
        if code_point <= 0xFF {
            code_point as u8
        } else {
            0xFF
        }
    }
}

impl DigitSource for CharSource<'_> {
    fn next(&mut self) -> Option<u8> {
        let byte = self.characters.get(self.cursor).map(|&c| Self::latin1(c));
        if byte.is_some() {
            self.cursor += 1;
        }
        byte
    }

    fn prev(&mut self) -> Option<u8> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(Self::latin1(self.characters[self.cursor]))
    }

    fn peek(&self) -> Option<u8> {
        self.characters.get(self.cursor).map(|&c| Self::latin1(c))
    }

    fn has_next(&self) -> bool {
        self.cursor < self.characters.len()
    }

    fn remaining_len(&self) -> usize {
        self.characters.len() - self.cursor
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/**
 * Etapa de prefijo + despacho de núcleo: signo opcional, rama hexadecimal
 * tras "0x"/"0X", descarte de ceros líderes (con guiones bajos legales
 * solo después de un cero) y núcleo decimal por defecto.
 */
#[instrument(level = "trace", skip(source))]
pub fn parse_integer<S: DigitSource>(source: &mut S) -> Result<BigInt, BigNumError> {
    let mut negative = false;
    match source.peek() {
        Some(b'+') => {
            source.next();
        }
        Some(b'-') => {
            negative = true;
            source.next();
        }
        _ => {}
    }

    let mut saw_leading_zero = false;
    if source.peek() == Some(b'0') {
        source.next();
        saw_leading_zero = true;
        if matches!(source.peek(), Some(b'x') | Some(b'X')) {
            source.next();
            let magnitude = parse_hex_magnitude(source)?;
            if magnitude.is_empty() {
                return Err(BigNumError::ParseError("empty hex digit sequence".to_owned()));
            }
            return Ok(BigInt::from_sign_magnitude(negative, magnitude));
        }
        let mut last_was_underscore = false;
        while let Some(byte) = source.peek() {
            match byte {
                b'0' => {
                    source.next();
                    last_was_underscore = false;
                }
                b'_' => {
                    source.next();
                    last_was_underscore = true;
                }
                _ => break,
            }
        }
        if last_was_underscore && !source.has_next() {
            return Err(BigNumError::ParseError("trailing underscore".to_owned()));
        }
    }

    if !source.has_next() {
        return if saw_leading_zero {
            Ok(BigInt::zero())
        } else {
            Err(BigNumError::ParseError("no digits present".to_owned()))
        };
    }

    let magnitude = parse_decimal_magnitude(source)?;
    Ok(BigInt::from_sign_magnitude(negative, magnitude))
}

/**
 * Variante hexadecimal explícita: signo opcional, prefijo "0x" opcional,
 * núcleo de nibbles.
 */
pub fn parse_hex_integer<S: DigitSource>(source: &mut S) -> Result<BigInt, BigNumError> {
    let mut negative = false;
    match source.peek() {
        Some(b'+') => {
            source.next();
        }
        Some(b'-') => {
            negative = true;
            source.next();
        }
        _ => {}
    }

    let mut saw_leading_zero = false;
    if source.peek() == Some(b'0') {
        source.next();
        if matches!(source.peek(), Some(b'x') | Some(b'X')) {
            source.next();
        } else {
            // El cero consumido es un dígito hexadecimal líder legítimo.
            saw_leading_zero = true;
        }
    }

    let magnitude = parse_hex_magnitude(source)?;
    if magnitude.is_empty() && !saw_leading_zero {
        return Err(BigNumError::ParseError("empty hex digit sequence".to_owned()));
    }
    Ok(BigInt::from_sign_magnitude(negative, magnitude))
}

/**
 * Núcleo decimal: acumula trozos de hasta 9 dígitos con
 * z = z · 10^k + trozo sobre un buffer pre-dimensionado.
 */
fn parse_decimal_magnitude<S: DigitSource>(source: &mut S) -> Result<Vec<u32>, BigNumError> {
    let remaining = source.remaining_len();
    let bit_estimate = ((remaining as u128 * LOG2_OF_10_FIXED as u128) >> 30) as usize + 1;
    let mut buffer = vec![0u32; bit_estimate / 32 + 2];
    let mut length = 0usize;

    let mut chunk: u32 = 0;
    let mut chunk_digits: usize = 0;
    let mut any_digit = false;
    let mut last_was_underscore = false;

    while let Some(byte) = source.next() {
        match byte {
            b'0'..=b'9' => {
                chunk = chunk * 10 + (byte - b'0') as u32;
                chunk_digits += 1;
                any_digit = true;
                last_was_underscore = false;
                if chunk_digits == 9 {
                    length = mul_u32_in_place(&mut buffer, length, POWERS_OF_TEN[9]);
                    length = add_assign_u64(&mut buffer, length, chunk as u64);
                    chunk = 0;
                    chunk_digits = 0;
                }
            }
            b'_' => {
                if !any_digit {
                    return Err(BigNumError::ParseError(
                        "underscore before first digit".to_owned(),
                    ));
                }
                last_was_underscore = true;
            }
            other => {
                return Err(BigNumError::ParseError(format!(
                    "invalid decimal character 0x{other:02X}"
                )));
            }
        }
    }

    if last_was_underscore {
        return Err(BigNumError::ParseError("trailing underscore".to_owned()));
    }
    if !any_digit {
        return Err(BigNumError::ParseError("no digits present".to_owned()));
    }
    if chunk_digits > 0 {
        length = mul_u32_in_place(&mut buffer, length, POWERS_OF_TEN[chunk_digits]);
        length = add_assign_u64(&mut buffer, length, chunk as u64);
    }

    buffer.truncate(length);
    Ok(buffer)
}

/**
 * Núcleo hexadecimal en dos fases: conteo de nibbles hacia adelante
 * (validando separadores), luego empaquetado hacia atrás con 'prev' de 8
 * nibbles por limb desde el menos significativo.
 */
fn parse_hex_magnitude<S: DigitSource>(source: &mut S) -> Result<Vec<u32>, BigNumError> {
    let mut nibble_count = 0usize;
    let mut last_was_underscore = false;

    while let Some(byte) = source.next() {
        match byte {
            b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F' => {
                nibble_count += 1;
                last_was_underscore = false;
            }
            b'_' => {
                if nibble_count == 0 {
                    return Err(BigNumError::ParseError(
                        "underscore before first digit".to_owned(),
                    ));
                }
                last_was_underscore = true;
            }
            other => {
                return Err(BigNumError::ParseError(format!(
                    "invalid hex character 0x{other:02X}"
                )));
            }
        }
    }
    if last_was_underscore {
        return Err(BigNumError::ParseError("trailing underscore".to_owned()));
    }
    if nibble_count == 0 {
        return Ok(Vec::new());
    }

    let mut limbs = vec![0u32; nibble_count.div_ceil(8)];
    let mut packed = 0usize;
    while packed < nibble_count {
        let Some(byte) = source.prev() else {
            return Err(BigNumError::InvalidState("hex backward walk exhausted"));
        };
        if byte == b'_' {
            continue;
        }
        let nibble = hex_nibble_value(byte);
        limbs[packed / 8] |= nibble << (4 * (packed % 8));
        packed += 1;
    }

    let length = normalized_length(&limbs, limbs.len());
    limbs.truncate(length);
    Ok(limbs)
}

/// Valor numérico de un nibble ya validado por la fase de conteo.
#[inline]
fn hex_nibble_value(byte: u8) -> u32 {
    match byte {
        b'0'..=b'9' => (byte - b'0') as u32,
        b'a'..=b'f' => (byte - b'a' + 10) as u32,
        _ => (byte - b'A' + 10) as u32,
    }
}

impl BigInt {
    /**
     * Análisis decimal (con auto-detección del prefijo "0x") desde texto.
     *
     * # Errors:
     * 'ParseError' ante entrada malformada.
     */
    pub fn from_decimal_str(text: &str) -> Result<Self, BigNumError> {
        let mut source = ByteSource::from(text);
        parse_integer(&mut source)
    }

    /**
     * Análisis hexadecimal (prefijo "0x" opcional) desde texto.
     *
     * # Errors:
     * 'ParseError' ante entrada malformada.
     */
    pub fn from_hex_str(text: &str) -> Result<Self, BigNumError> {
        let mut source = ByteSource::from(text);
        parse_hex_integer(&mut source)
    }
}

impl FromStr for BigInt {
    type Err = BigNumError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(text)
    }
}
