// [libs/core/bignum-engine/src/big_integer.rs]
/*!
 * =================================================================
 * APARATO: IMMUTABLE BIG INTEGER (V7.0 - SIGN-MAGNITUDE SOVEREIGN)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: VALOR INMUTABLE CON SIGNO Y SUPERFICIE ALGEBRAICA PLENA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FROZEN BUFFERS: El buffer de limbs queda lógicamente congelado tras
 *    la construcción; toda operación produce un valor nuevo.
 * 2. SIGNED DISPATCH: La suma y la resta con signo se reducen a las
 *    primitivas sin signo comparando magnitudes cuando las polaridades
 *    difieren.
 * 3. CANONICAL ZERO: Un centinela perezoso único; clonar el cero jamás
 *    asigna memoria (el Vec vacío carece de heap).
 *
 * # Mathematical Proof (Truncating Division):
 * signo(cociente) = signo(x) XOR signo(y); signo(resto) = signo(x).
 * El módulo exige divisor positivo y repone el divisor cuando el resto
 * truncado resulta negativo, garantizando 0 <= a mod b < b.
 * =================================================================
 */

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Rem, Shl, Shr, Sub};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arithmetic::{add_into, compare_magnitudes, normalized_length, sub_into};
use crate::bitwise;
use crate::division::{div_rem_by_u32, div_rem_by_u64, div_rem_knuth, try_div_fast_path, FastDivOutcome};
use crate::errors::BigNumError;
use crate::karatsuba;
use crate::meta::SignedMeta;
use crate::multiplication::mul_into;

/// Centinela global del cero canónico. Se inicializa una vez y jamás muta.
static CANONICAL_ZERO: Lazy<BigInt> = Lazy::new(|| BigInt {
    meta: SignedMeta::ZERO,
    limbs: Vec::new(),
});

/**
 * Entero de precisión arbitraria con signo, inmutable.
 *
 * Representación: descriptor empaquetado (signo + longitud) más un buffer
 * little-endian de limbs u32 cuya longitud coincide con la longitud
 * normalizada. La forma canónica habilita la igualdad y el hash derivados.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BigInt {
    pub(crate) meta: SignedMeta,
    pub(crate) limbs: Vec<u32>,
}

impl BigInt {
    /// Clon del centinela canónico del cero.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        CANONICAL_ZERO.clone()
    }

    /// La unidad multiplicativa.
    #[inline]
    #[must_use]
    pub fn one() -> Self {
        Self::from(1u32)
    }

    /**
     * Construye desde un signo y una magnitud little-endian arbitraria.
     * La magnitud se normaliza y el signo de un cero se fuerza a positivo.
     */
    #[must_use]
    pub fn from_sign_magnitude(is_negative: bool, mut limbs: Vec<u32>) -> Self {
        let length = normalized_length(&limbs, limbs.len());
        limbs.truncate(length);
        Self {
            meta: SignedMeta::new(is_negative, length),
            limbs,
        }
    }

    /// Constructor interno: contrato de magnitud ya normalizada.
    #[inline]
    pub(crate) fn from_normalized(is_negative: bool, limbs: Vec<u32>) -> Self {
        debug_assert_eq!(normalized_length(&limbs, limbs.len()), limbs.len());
        Self {
            meta: SignedMeta::new(is_negative, limbs.len()),
            limbs,
        }
    }

    // --- INTERFAZ DE INSPECCIÓN ---

    /// Verdadero para el cero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.meta.is_zero()
    }

    /// Bandera de signo.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.meta.is_negative()
    }

    /// Signum del valor: -1, 0 o +1.
    #[inline]
    #[must_use]
    pub fn signum(&self) -> i32 {
        self.meta.signum()
    }

    /// Longitud en bits de la magnitud.
    #[inline]
    #[must_use]
    pub fn bit_length(&self) -> u64 {
        bitwise::bit_length(&self.limbs, self.limbs.len())
    }

    /// Vista de solo lectura de la magnitud little-endian.
    #[inline]
    #[must_use]
    pub fn magnitude_limbs(&self) -> &[u32] {
        &self.limbs
    }

    // --- ÁLGEBRA CON SIGNO ---

    /**
     * Despacho con signo de la suma: polaridades iguales suman magnitudes;
     * polaridades opuestas restan la menor de la mayor y heredan el signo
     * de la mayor. Magnitudes iguales colapsan al cero canónico.
     */
    fn add_signed(x_negative: bool, x: &[u32], y_negative: bool, y: &[u32]) -> Self {
        if x_negative == y_negative {
            let mut dest = vec![0u32; x.len().max(y.len()) + 1];
            let length = add_into(&mut dest, x, x.len(), y, y.len());
            dest.truncate(length);
            return Self::from_normalized(x_negative, dest);
        }
        match compare_magnitudes(x, x.len(), y, y.len()) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                let mut dest = vec![0u32; x.len()];
                let length = sub_into(&mut dest, x, x.len(), y, y.len());
                dest.truncate(length);
                Self::from_normalized(x_negative, dest)
            }
            Ordering::Less => {
                let mut dest = vec![0u32; y.len()];
                let length = sub_into(&mut dest, y, y.len(), x, x.len());
                dest.truncate(length);
                Self::from_normalized(y_negative, dest)
            }
        }
    }

    /// Suma inmutable.
    #[must_use]
    fn sum(&self, other: &Self) -> Self {
        Self::add_signed(
            self.is_negative(),
            &self.limbs,
            other.is_negative(),
            &other.limbs,
        )
    }

    /// Resta inmutable.
    #[must_use]
    fn difference(&self, other: &Self) -> Self {
        Self::add_signed(
            self.is_negative(),
            &self.limbs,
            !other.is_negative(),
            &other.limbs,
        )
    }

    /// Producto inmutable (escolar; el cuadrado largo usa Karatsuba).
    #[must_use]
    fn product(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut dest = vec![0u32; self.limbs.len() + other.limbs.len()];
        let length = mul_into(
            &mut dest,
            &self.limbs,
            self.limbs.len(),
            &other.limbs,
            other.limbs.len(),
        );
        dest.truncate(length);
        Self::from_normalized(self.is_negative() ^ other.is_negative(), dest)
    }

    /**
     * Cuadrado inmutable. Despacha al motor Karatsuba por encima del
     * umbral; el resultado jamás es negativo.
     */
    #[must_use]
    pub fn square(&self) -> Self {
        let n = self.limbs.len();
        if n == 0 {
            return Self::zero();
        }
        let mut dest = vec![0u32; 2 * n];
        let mut scratch = vec![0u32; karatsuba::square_scratch_length(n)];
        let length = karatsuba::square_into(&mut dest, &self.limbs, &mut scratch);
        dest.truncate(length);
        Self::from_normalized(false, dest)
    }

    /**
     * Cociente y resto truncados hacia cero.
     *
     * # Errors:
     * 'DivisionByZero' ante un divisor nulo.
     */
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), BigNumError> {
        if divisor.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        let (quotient_mag, remainder_mag) = div_rem_magnitudes(&self.limbs, &divisor.limbs);
        let quotient_negative = self.is_negative() ^ divisor.is_negative();
        Ok((
            Self::from_normalized(quotient_negative, quotient_mag),
            Self::from_normalized(self.is_negative(), remainder_mag),
        ))
    }

    /**
     * Módulo euclídeo acotado: 0 <= resultado < divisor.
     *
     * # Errors:
     * 'DivisionByZero' ante divisor nulo; 'NegativeModulus' ante divisor
     * negativo.
     */
    pub fn modulus(&self, divisor: &Self) -> Result<Self, BigNumError> {
        if divisor.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        if divisor.is_negative() {
            return Err(BigNumError::NegativeModulus);
        }
        let (_, remainder) = self.div_rem(divisor)?;
        if remainder.is_negative() {
            Ok(remainder.sum(divisor))
        } else {
            Ok(remainder)
        }
    }

    /// Negación inmutable; negar el cero es nulo.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            meta: self.meta.negated(),
            limbs: self.limbs.clone(),
        }
    }

    /// Valor absoluto inmutable.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            meta: self.meta.abs(),
            limbs: self.limbs.clone(),
        }
    }

    // --- DESPLAZAMIENTOS ---

    /**
     * Desplazamiento a la izquierda.
     *
     * # Errors:
     * 'NegativeArgument' ante un conteo negativo.
     */
    pub fn shifted_left(&self, bit_count: i64) -> Result<Self, BigNumError> {
        if bit_count < 0 {
            return Err(BigNumError::NegativeArgument("shift bit count"));
        }
        Ok(self.shift_left_magnitude(bit_count as usize))
    }

    fn shift_left_magnitude(&self, bit_count: usize) -> Self {
        if self.is_zero() || bit_count == 0 {
            return self.clone();
        }
        let x_len = self.limbs.len();
        let mut dest = vec![0u32; x_len + bit_count / 32 + 1];
        let length = bitwise::shift_left_into(&mut dest, &self.limbs, x_len, bit_count);
        dest.truncate(length);
        Self::from_normalized(self.is_negative(), dest)
    }

    /**
     * Desplazamiento aritmético a la derecha (semántica de complemento a
     * dos): sobre un negativo cuyos bits descartados incluyan algún 1, la
     * magnitud desplazada se incrementa en uno.
     *
     * # Errors:
     * 'NegativeArgument' ante un conteo negativo.
     */
    pub fn shifted_right(&self, bit_count: i64) -> Result<Self, BigNumError> {
        if bit_count < 0 {
            return Err(BigNumError::NegativeArgument("shift bit count"));
        }
        Ok(self.shift_right_arithmetic(bit_count as usize))
    }

    fn shift_right_arithmetic(&self, bit_count: usize) -> Self {
        if self.is_zero() || bit_count == 0 {
            return self.clone();
        }
        let x_len = self.limbs.len();
        let dropped_one = self.is_negative()
            && bitwise::test_any_bit_in_lower_n(&self.limbs, x_len, bit_count as u64);

        let mut dest = vec![0u32; x_len];
        let mut length = bitwise::shift_right_into(&mut dest, &self.limbs, x_len, bit_count);
        if dropped_one {
            dest.push(0);
            length = crate::arithmetic::add_assign_u64(&mut dest, length, 1);
        }
        dest.truncate(length);
        Self::from_normalized(self.is_negative(), dest)
    }

    // --- SUPERFICIE DE BITS (sobre la magnitud) ---

    /**
     * Interroga un bit de la magnitud.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn test_bit(&self, bit_index: i64) -> Result<bool, BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        Ok(bitwise::test_bit(
            &self.limbs,
            self.limbs.len(),
            bit_index as u64,
        ))
    }

    /**
     * Valor nuevo con el bit indicado encendido.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn set_bit(&self, bit_index: i64) -> Result<Self, BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        let index = bit_index as u64;
        let required = (index / 32) as usize + 1;
        let mut limbs = vec![0u32; required.max(self.limbs.len())];
        limbs[..self.limbs.len()].copy_from_slice(&self.limbs);
        bitwise::set_bit_in(&mut limbs, index);
        Ok(Self::from_sign_magnitude(self.is_negative(), limbs))
    }

    /**
     * Valor nuevo con el bit indicado apagado.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn clear_bit(&self, bit_index: i64) -> Result<Self, BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        let mut limbs = self.limbs.clone();
        let limbs_len = limbs.len();
        bitwise::clear_bit_in(&mut limbs, limbs_len, bit_index as u64);
        Ok(Self::from_sign_magnitude(self.is_negative(), limbs))
    }

    /// Conteo de ceros al final de la magnitud (0 para el cero).
    #[must_use]
    pub fn count_trailing_zeros(&self) -> u64 {
        bitwise::count_trailing_zeros(&self.limbs, self.limbs.len())
    }

    /// Población de bits encendidos de la magnitud.
    #[must_use]
    pub fn count_one_bits(&self) -> u64 {
        bitwise::count_one_bits(&self.limbs, self.limbs.len())
    }

    /// Ventana de 64 bits de la magnitud a partir de un índice de bit.
    #[must_use]
    pub fn extract_u64_at_bit_index(&self, bit_index: u64) -> u64 {
        bitwise::extract_u64_at_bit_index(&self.limbs, self.limbs.len(), bit_index)
    }
}

/**
 * División de magnitudes con despacho por estratos: atajos tipados,
 * divisor de 1 limb, divisor de 2 limbs y Algoritmo D pleno.
 */
fn div_rem_magnitudes(x: &[u32], y: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let x_len = x.len();
    let y_len = y.len();

    match try_div_fast_path(x, x_len, y, y_len) {
        Some(FastDivOutcome::QuotientZero) => {
            trace!(x_len, y_len, "division fast path: quotient zero");
            return (Vec::new(), x.to_vec());
        }
        Some(FastDivOutcome::QuotientOne) => {
            trace!(x_len, y_len, "division fast path: quotient one");
            let mut remainder = vec![0u32; x_len];
            let length = sub_into(&mut remainder, x, x_len, y, y_len);
            remainder.truncate(length);
            return (vec![1], remainder);
        }
        None => {}
    }

    if y_len == 1 {
        let mut quotient = vec![0u32; x_len];
        let (q_len, remainder) = div_rem_by_u32(&mut quotient, x, x_len, y[0]);
        quotient.truncate(q_len);
        let remainder_mag = if remainder == 0 { Vec::new() } else { vec![remainder] };
        return (quotient, remainder_mag);
    }

    if y_len == 2 {
        let divisor = (y[1] as u64) << 32 | y[0] as u64;
        let mut quotient = vec![0u32; x_len];
        let (q_len, remainder) = div_rem_by_u64(&mut quotient, x, x_len, divisor);
        quotient.truncate(q_len);
        let mut remainder_mag = vec![remainder as u32, (remainder >> 32) as u32];
        let r_len = normalized_length(&remainder_mag, 2);
        remainder_mag.truncate(r_len);
        return (quotient, remainder_mag);
    }

    let mut quotient = vec![0u32; x_len - y_len + 1];
    let mut un = vec![0u32; x_len + 1];
    un[..x_len].copy_from_slice(x);
    let mut vn = vec![0u32; y_len + 1];
    let (q_len, r_len) = div_rem_knuth(&mut quotient, &mut un, &mut vn, x_len, y, y_len);
    quotient.truncate(q_len);
    un.truncate(r_len);
    (quotient, un)
}

// --- ORDEN TOTAL ---

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign_order = self.signum().cmp(&other.signum());
        if sign_order != Ordering::Equal {
            return sign_order;
        }
        let magnitude_order = compare_magnitudes(
            &self.limbs,
            self.limbs.len(),
            &other.limbs,
            other.limbs.len(),
        );
        if self.is_negative() {
            magnitude_order.reverse()
        } else {
            magnitude_order
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// --- CONVERSIONES DESDE ANCHURAS FIJAS ---

impl From<u32> for BigInt {
    fn from(value: u32) -> Self {
        if value == 0 {
            Self::zero()
        } else {
            Self::from_normalized(false, vec![value])
        }
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        let limbs = match ((value >> 32) as u32, value as u32) {
            (0, 0) => return Self::zero(),
            (0, low) => vec![low],
            (high, low) => vec![low, high],
        };
        Self::from_normalized(false, limbs)
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        let magnitude = Self::from(value.unsigned_abs());
        if value < 0 {
            magnitude.negated()
        } else {
            magnitude
        }
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        let magnitude = Self::from(value.unsigned_abs());
        if value < 0 {
            magnitude.negated()
        } else {
            magnitude
        }
    }
}

// --- CONVERSIONES EXACTAS HACIA ANCHURAS FIJAS ---

impl TryFrom<&BigInt> for u64 {
    type Error = BigNumError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        if value.is_negative() {
            return Err(BigNumError::OutOfRange("negative value into u64"));
        }
        if value.bit_length() > 64 {
            return Err(BigNumError::OutOfRange("magnitude exceeds u64"));
        }
        Ok(value.extract_u64_at_bit_index(0))
    }
}

impl TryFrom<&BigInt> for u32 {
    type Error = BigNumError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        let wide = u64::try_from(value)
            .map_err(|_| BigNumError::OutOfRange("value does not fit u32"))?;
        u32::try_from(wide).map_err(|_| BigNumError::OutOfRange("magnitude exceeds u32"))
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = BigNumError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        if value.bit_length() > 64 {
            return Err(BigNumError::OutOfRange("magnitude exceeds i64"));
        }
        let magnitude = value.extract_u64_at_bit_index(0);
        if value.is_negative() {
            if magnitude > 1u64 << 63 {
                return Err(BigNumError::OutOfRange("magnitude exceeds i64"));
            }
            Ok((magnitude as i64).wrapping_neg())
        } else {
            i64::try_from(magnitude).map_err(|_| BigNumError::OutOfRange("magnitude exceeds i64"))
        }
    }
}

impl TryFrom<&BigInt> for i32 {
    type Error = BigNumError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        let wide = i64::try_from(value)?;
        i32::try_from(wide).map_err(|_| BigNumError::OutOfRange("value does not fit i32"))
    }
}

// --- AZÚCAR DE OPERADORES ---
// El despacho mixto (escalar vs. precisión arbitraria) de la vía inmutable
// eleva el escalar a BigInt; la vía de asignación amortizada cero vive en
// el acumulador.

macro_rules! forward_value_binop {
    ($trait_name:ident, $method:ident, $delegate:ident) => {
        impl $trait_name<&BigInt> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                self.$delegate(rhs)
            }
        }

        impl $trait_name<BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                (&self).$delegate(&rhs)
            }
        }

        impl $trait_name<&BigInt> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: &BigInt) -> BigInt {
                (&self).$delegate(rhs)
            }
        }

        impl $trait_name<BigInt> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: BigInt) -> BigInt {
                self.$delegate(&rhs)
            }
        }

        impl $trait_name<i64> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: i64) -> BigInt {
                self.$delegate(&BigInt::from(rhs))
            }
        }

        impl $trait_name<i64> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: i64) -> BigInt {
                (&self).$delegate(&BigInt::from(rhs))
            }
        }

        impl $trait_name<u64> for &BigInt {
            type Output = BigInt;
            fn $method(self, rhs: u64) -> BigInt {
                self.$delegate(&BigInt::from(rhs))
            }
        }

        impl $trait_name<u64> for BigInt {
            type Output = BigInt;
            fn $method(self, rhs: u64) -> BigInt {
                (&self).$delegate(&BigInt::from(rhs))
            }
        }
    };
}

impl BigInt {
    fn quotient_or_panic(&self, divisor: &Self) -> Self {
        match self.div_rem(divisor) {
            Ok((quotient, _)) => quotient,
            Err(fault) => panic!("{fault}"),
        }
    }

    fn remainder_or_panic(&self, divisor: &Self) -> Self {
        match self.div_rem(divisor) {
            Ok((_, remainder)) => remainder,
            Err(fault) => panic!("{fault}"),
        }
    }
}

forward_value_binop!(Add, add, sum);
forward_value_binop!(Sub, sub, difference);
forward_value_binop!(Mul, mul, product);
forward_value_binop!(Div, div, quotient_or_panic);
forward_value_binop!(Rem, rem, remainder_or_panic);

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.negated()
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;
    fn shl(self, bit_count: u32) -> BigInt {
        self.shift_left_magnitude(bit_count as usize)
    }
}

impl Shl<u32> for BigInt {
    type Output = BigInt;
    fn shl(self, bit_count: u32) -> BigInt {
        (&self).shift_left_magnitude(bit_count as usize)
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;
    fn shr(self, bit_count: u32) -> BigInt {
        self.shift_right_arithmetic(bit_count as usize)
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;
    fn shr(self, bit_count: u32) -> BigInt {
        (&self).shift_right_arithmetic(bit_count as usize)
    }
}
