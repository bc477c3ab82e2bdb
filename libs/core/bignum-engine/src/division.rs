// [libs/core/bignum-engine/src/division.rs]
/*!
 * =================================================================
 * APARATO: DIVISION KERNEL (V6.1 - KNUTH D SOVEREIGN)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: COCIENTE Y RESTO SOBRE MAGNITUDES DE LIMBS U32
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. THREE-TIER DISPATCH: divisor de 1 limb (división larga simple),
 *    divisor de 2 limbs (aritmética nativa de 128 bits) y divisor
 *    multi-limb (Algoritmo D de Knuth con normalización).
 * 2. TWO-CORRECTION BOUND: La estimación de cociente con 2 limbs admite
 *    a lo sumo dos correcciones por dígito; el add-back residual cubre
 *    el caso restante con probabilidad 2/B.
 * 3. TYPED FAST PATHS: Los atajos reportan 'Option': 'None' significa
 *    "no aplica, caer a la división completa".
 *
 * # Mathematical Proof (Normalization):
 * Desplazar ambos operandos por los ceros líderes del divisor garantiza
 * v1 >= 2^31, la condición de Knuth para que la estimación q̂ difiera del
 * dígito verdadero en a lo sumo 2 tras el test de segundo limb.
 * =================================================================
 */

use std::cmp::Ordering;

use crate::arithmetic::{compare_magnitudes, normalized_length};
use crate::bitwise::{shift_left_in_place, shift_left_into, shift_right_in_place};

/// Veredicto de los atajos de división.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastDivOutcome {
    /// |x| < |y|: cociente 0, resto x.
    QuotientZero,
    /// Misma longitud y magnitudes comparables por resta directa:
    /// cociente 1, resto x - y.
    QuotientOne,
}

/**
 * Evalúa los atajos sin ejecutar la división completa.
 *
 * Con longitudes iguales y limbs líderes idénticos, el cociente queda
 * acotado por (top+1)/top <= 2, de modo que una única comparación decide
 * entre 0 y 1.
 */
#[must_use]
pub fn try_div_fast_path(x: &[u32], x_len: usize, y: &[u32], y_len: usize) -> Option<FastDivOutcome> {
    if x_len < y_len {
        return Some(FastDivOutcome::QuotientZero);
    }
    if x_len == y_len {
        match x[x_len - 1].cmp(&y[y_len - 1]) {
            Ordering::Less => return Some(FastDivOutcome::QuotientZero),
            Ordering::Equal => {
                return match compare_magnitudes(x, x_len, y, y_len) {
                    Ordering::Less => Some(FastDivOutcome::QuotientZero),
                    _ => Some(FastDivOutcome::QuotientOne),
                };
            }
            Ordering::Greater => return None,
        }
    }
    None
}

/**
 * División larga por divisor de 32 bits, sin aliasing:
 * quotient = x / w, retorna (longitud del cociente, resto).
 */
pub fn div_rem_by_u32(quotient: &mut [u32], x: &[u32], x_len: usize, w: u32) -> (usize, u32) {
    debug_assert!(w != 0);
    let divisor = w as u64;
    let mut remainder: u64 = 0;
    for index in (0..x_len).rev() {
        let combined = (remainder << 32) | x[index] as u64;
        quotient[index] = (combined / divisor) as u32;
        remainder = combined % divisor;
    }
    (normalized_length(quotient, x_len), remainder as u32)
}

/// División larga por divisor de 32 bits en sitio sobre el buffer.
pub fn div_rem_by_u32_in_place(buffer: &mut [u32], length: usize, w: u32) -> (usize, u32) {
    debug_assert!(w != 0);
    let divisor = w as u64;
    let mut remainder: u64 = 0;
    for index in (0..length).rev() {
        let combined = (remainder << 32) | buffer[index] as u64;
        buffer[index] = (combined / divisor) as u32;
        remainder = combined % divisor;
    }
    (normalized_length(buffer, length), remainder as u32)
}

/// Resto de la división por divisor de 32 bits, sin materializar cociente.
#[must_use]
pub fn rem_by_u32(x: &[u32], x_len: usize, w: u32) -> u32 {
    debug_assert!(w != 0);
    let divisor = w as u64;
    let mut remainder: u64 = 0;
    for index in (0..x_len).rev() {
        remainder = ((remainder << 32) | x[index] as u64) % divisor;
    }
    remainder as u32
}

/**
 * División larga por divisor de 64 bits: quotient = x / value.
 *
 * El invariante resto < divisor < 2^64 acota cada dividendo parcial por
 * debajo de 2^96; la aritmética nativa de 128 bits lo procesa sin la
 * normalización de dividendo que exigiría una estimación de 2 limbs.
 */
pub fn div_rem_by_u64(quotient: &mut [u32], x: &[u32], x_len: usize, value: u64) -> (usize, u64) {
    debug_assert!(value != 0);
    if value <= u32::MAX as u64 {
        let (length, remainder) = div_rem_by_u32(quotient, x, x_len, value as u32);
        return (length, remainder as u64);
    }
    let divisor = value as u128;
    let mut remainder: u128 = 0;
    for index in (0..x_len).rev() {
        let combined = (remainder << 32) | x[index] as u128;
        quotient[index] = (combined / divisor) as u32;
        remainder = combined % divisor;
    }
    (normalized_length(quotient, x_len), remainder as u64)
}

/// División larga por divisor de 64 bits en sitio sobre el buffer.
pub fn div_rem_by_u64_in_place(buffer: &mut [u32], length: usize, value: u64) -> (usize, u64) {
    debug_assert!(value != 0);
    if value <= u32::MAX as u64 {
        let (q_len, remainder) = div_rem_by_u32_in_place(buffer, length, value as u32);
        return (q_len, remainder as u64);
    }
    let divisor = value as u128;
    let mut remainder: u128 = 0;
    for index in (0..length).rev() {
        let combined = (remainder << 32) | buffer[index] as u128;
        buffer[index] = (combined / divisor) as u32;
        remainder = combined % divisor;
    }
    (normalized_length(buffer, length), remainder as u64)
}

/// Resto de la división por divisor de 64 bits, sin materializar cociente.
#[must_use]
pub fn rem_by_u64(x: &[u32], x_len: usize, value: u64) -> u64 {
    debug_assert!(value != 0);
    if value <= u32::MAX as u64 {
        return rem_by_u32(x, x_len, value as u32) as u64;
    }
    let divisor = value as u128;
    let mut remainder: u128 = 0;
    for index in (0..x_len).rev() {
        remainder = ((remainder << 32) | x[index] as u128) % divisor;
    }
    remainder as u64
}

/**
 * Algoritmo D de Knuth: divide el dividendo pre-cargado en 'un' entre
 * y (y_len >= 2 limbs).
 *
 * Contratos:
 * - x_len >= y_len >= 2 y divisor normalizado (y[y_len-1] != 0).
 * - 'un' mide al menos x_len + 1 limbs y porta el dividendo sin
 *   normalizar en un[0..x_len]; el aparato lo desplaza en sitio. Este
 *   contrato permite al acumulador ceder su buffer primario como
 *   destino del cociente mientras 'un' vive en tmp1.
 * - 'quotient' mide al menos x_len - y_len + 1 limbs.
 * - 'vn' mide al menos y_len + 1 limbs (divisor normalizado; el limb
 *   extra absorbe el derrame nulo del desplazamiento).
 *
 * Retorna (longitud del cociente, longitud del resto). El resto queda
 * des-normalizado en un[0..longitud_del_resto].
 */
pub fn div_rem_knuth(
    quotient: &mut [u32],
    un: &mut [u32],
    vn: &mut [u32],
    x_len: usize,
    y: &[u32],
    y_len: usize,
) -> (usize, usize) {
    debug_assert!(y_len >= 2);
    debug_assert!(x_len >= y_len);
    debug_assert!(y[y_len - 1] != 0);

    // D1: normalización por los ceros líderes del divisor.
    let shift = y[y_len - 1].leading_zeros() as usize;
    if shift == 0 {
        vn[..y_len].copy_from_slice(&y[..y_len]);
        un[x_len] = 0;
    } else {
        shift_left_into(vn, y, y_len, shift);
        let shifted_len = shift_left_in_place(un, x_len, shift);
        for limb in un[shifted_len..=x_len].iter_mut() {
            *limb = 0;
        }
    }

    let b: u64 = 1 << 32;
    let v1 = vn[y_len - 1] as u64;
    let v2 = vn[y_len - 2] as u64;
    let digit_count = x_len - y_len;

    // D2..D7: un dígito de cociente por iteración, del más significativo
    // al menos significativo.
    for j in (0..=digit_count).rev() {
        // D3: estimación con los dos limbs superiores del dividendo parcial.
        let numerator = ((un[j + y_len] as u64) << 32) | un[j + y_len - 1] as u64;
        let mut q_hat = numerator / v1;
        let mut r_hat = numerator % v1;

        loop {
            if q_hat >= b || q_hat * v2 > ((r_hat << 32) | un[j + y_len - 2] as u64) {
                q_hat -= 1;
                r_hat += v1;
                if r_hat < b {
                    continue;
                }
            }
            break;
        }

        // D4: multiplica y resta la fila q̂ · vn del dividendo parcial.
        let mut mul_carry: u64 = 0;
        let mut borrow: u64 = 0;
        for i in 0..y_len {
            let product = q_hat * vn[i] as u64 + mul_carry;
            mul_carry = product >> 32;
            let difference = (un[j + i] as u64)
                .wrapping_sub(product & 0xFFFF_FFFF)
                .wrapping_sub(borrow);
            un[j + i] = difference as u32;
            borrow = (difference >> 32) & 1;
        }
        let top = (un[j + y_len] as u64)
            .wrapping_sub(mul_carry)
            .wrapping_sub(borrow);
        un[j + y_len] = top as u32;

        // D5/D6: si la resta quedó negativa, el dígito estimado excedía en
        // uno; se repone una fila del divisor.
        if (top >> 32) & 1 == 1 {
            q_hat -= 1;
            let mut carry: u64 = 0;
            for i in 0..y_len {
                carry += un[j + i] as u64 + vn[i] as u64;
                un[j + i] = carry as u32;
                carry >>= 32;
            }
            un[j + y_len] = (un[j + y_len] as u64).wrapping_add(carry) as u32;
        }

        quotient[j] = q_hat as u32;
    }

    // D8: des-normaliza el resto.
    let raw_remainder_len = normalized_length(un, y_len);
    let remainder_len = shift_right_in_place(un, raw_remainder_len, shift);
    (normalized_length(quotient, digit_count + 1), remainder_len)
}
