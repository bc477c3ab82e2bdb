// [libs/core/bignum-engine/src/primality.rs]
/*!
 * =================================================================
 * APARATO: PRIMALITY CERTIFICATION ENGINE (V4.2 - BAILLIE-PSW)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CERTIFICACIÓN COMPUESTA DE PRIMALIDAD
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. THREE-STAGE VERDICT: filtro de primos pequeños (tabla <= 317 con
 *    atajo de completitud bajo 317²), Miller-Rabin base 2 sobre el
 *    contexto modular caliente y Lucas fuerte con parámetros Selfridge.
 * 2. DETERMINISTIC U64: el conjunto de bases Jaeschke/Sinclair decide
 *    sin error todo candidato bajo 2^64.
 * 3. RANDOM REINFORCEMENT: rondas Miller-Rabin de base aleatoria
 *    uniformes en [2, n-2] como refuerzo opcional del veredicto BPSW.
 *
 * # Mathematical Proof (Lucas Doubling):
 * U_{2m} = U_m·V_m ; V_{2m} = V_m² - 2·Q^m ; Q^{2m} = (Q^m)² y el paso
 * impar U_{2m+1} = (U_{2m} + V_{2m})/2 ; V_{2m+1} = (V_{2m} + D·U_{2m})/2
 * con P = 1. La mitad modular usa (x + n)/2 para x impar sobre n impar.
 * =================================================================
 */

use std::cmp::Ordering;

use rand::Rng;
use tracing::instrument;

use crate::arithmetic::compare_magnitude_with_u64;
use crate::big_integer::BigInt;
use crate::division::rem_by_u32;
use crate::errors::BigNumError;
use crate::modular::ModContext;

/// Primos de la criba de división tentativa, hasta 317 inclusive.
static SMALL_PRIMES: [u32; 66] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317,
];

/// 317²: todo superviviente de la criba que no lo exceda es primo.
const SMALL_PRIME_SQUARE_BOUND: u64 = 100_489;

/// Bases testigo Jaeschke/Sinclair: deterministas para todo n < 2^64.
const MILLER_RABIN_U64_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/**
 * Filtro de primos pequeños: decide los candidatos triviales y deja pasar
 * (None) a los supervivientes impares por encima de 317².
 */
fn small_prime_filter(n: &BigInt) -> Option<bool> {
    if n.signum() <= 0 {
        return Some(false);
    }
    let limbs = n.magnitude_limbs();
    let length = limbs.len();
    if compare_magnitude_with_u64(limbs, length, 1) == Ordering::Equal {
        return Some(false);
    }
    if limbs[0] & 1 == 0 {
        return Some(compare_magnitude_with_u64(limbs, length, 2) == Ordering::Equal);
    }
    for &prime in &SMALL_PRIMES[1..] {
        if rem_by_u32(limbs, length, prime) == 0 {
            return Some(
                compare_magnitude_with_u64(limbs, length, prime as u64) == Ordering::Equal,
            );
        }
    }
    if compare_magnitude_with_u64(limbs, length, SMALL_PRIME_SQUARE_BOUND) != Ordering::Greater {
        return Some(true);
    }
    None
}

/**
 * Una ronda Miller-Rabin: retorna verdadero si la base no delata al
 * candidato. Precondiciones: n impar > 3, n - 1 = odd_part · 2^s.
 */
fn miller_rabin_witness(
    context: &mut ModContext,
    n_minus_one: &BigInt,
    odd_part: &BigInt,
    s: u64,
    base: &BigInt,
) -> Result<bool, BigNumError> {
    let mut x = context.mod_pow(base, odd_part)?;
    if x == BigInt::one() || x == *n_minus_one {
        return Ok(true);
    }
    for _ in 1..s {
        x = context.mod_sqr(&x)?;
        if x == *n_minus_one {
            return Ok(true);
        }
        if x == BigInt::one() {
            return Ok(false);
        }
    }
    Ok(false)
}

/**
 * Símbolo de Jacobi (a|n) ∈ {-1, 0, +1} por reducción binaria: descarte
 * de doses con el giro según n mod 8 y el intercambio de reciprocidad
 * cuadrática.
 *
 * # Errors:
 * 'InvalidState' si el módulo no es impar y positivo.
 */
pub fn jacobi_symbol(a: &BigInt, n: &BigInt) -> Result<i32, BigNumError> {
    if n.signum() <= 0 {
        return Err(BigNumError::InvalidState(
            "jacobi symbol requires a positive modulus",
        ));
    }
    if n.magnitude_limbs()[0] & 1 == 0 {
        return Err(BigNumError::InvalidState(
            "jacobi symbol requires an odd modulus",
        ));
    }

    let mut numerator = a.modulus(n)?;
    let mut denominator = n.clone();
    let mut sign = 1i32;

    while !numerator.is_zero() {
        let twos = numerator.count_trailing_zeros();
        if twos > 0 {
            numerator = numerator.shifted_right(twos as i64)?;
            if twos & 1 == 1 {
                let residue = denominator.extract_u64_at_bit_index(0) & 7;
                if residue == 3 || residue == 5 {
                    sign = -sign;
                }
            }
        }
        if numerator.extract_u64_at_bit_index(0) & 3 == 3
            && denominator.extract_u64_at_bit_index(0) & 3 == 3
        {
            sign = -sign;
        }
        std::mem::swap(&mut numerator, &mut denominator);
        numerator = numerator.modulus(&denominator)?;
    }

    if denominator == BigInt::one() {
        Ok(sign)
    } else {
        Ok(0)
    }
}

/// Raíz cuadrada entera por iteración de Newton con arranque por exceso.
fn integer_sqrt(n: &BigInt) -> Result<BigInt, BigNumError> {
    let mut guess = BigInt::one().shifted_left((n.bit_length() / 2 + 1) as i64)?;
    loop {
        let (quotient, _) = n.div_rem(&guess)?;
        let next = (&guess + &quotient) >> 1u32;
        if next >= guess {
            return Ok(guess);
        }
        guess = next;
    }
}

/// Verdadero si n es un cuadrado perfecto (filtro mod 16 + Newton).
fn is_perfect_square(n: &BigInt) -> bool {
    if n.signum() < 0 {
        return false;
    }
    if n.is_zero() {
        return true;
    }
    let residue = n.extract_u64_at_bit_index(0) & 15;
    if !matches!(residue, 0 | 1 | 4 | 9) {
        return false;
    }
    integer_sqrt(n)
        .map(|root| root.square() == *n)
        .unwrap_or(false)
}

/**
 * Barrido de Selfridge: D ∈ {5, -7, 9, -11, ...} hasta jacobi(D, n) = -1.
 * Un símbolo nulo con |D| != n delata un compuesto (None).
 */
fn selfridge_parameter(n: &BigInt) -> Result<Option<i64>, BigNumError> {
    let mut d_candidate: i64 = 5;
    loop {
        match jacobi_symbol(&BigInt::from(d_candidate), n)? {
            -1 => return Ok(Some(d_candidate)),
            0 => {
                if BigInt::from(d_candidate.unsigned_abs()) != *n {
                    return Ok(None);
                }
            }
            _ => {}
        }
        d_candidate = if d_candidate > 0 {
            -(d_candidate + 2)
        } else {
            -(d_candidate - 2)
        };
    }
}

/**
 * Lucas fuerte con P = 1, Q = (1 - D)/4: doblaje de izquierda a derecha
 * sobre la parte impar de n + 1, luego la cadena V_{d·2^r}.
 */
fn strong_lucas_probable_prime(n: &BigInt, d_parameter: i64) -> Result<bool, BigNumError> {
    let mut context = ModContext::new(n)?;
    let q_value = (1 - d_parameter) / 4;
    let q_reduced = BigInt::from(q_value).modulus(n)?;
    let d_reduced = BigInt::from(d_parameter).modulus(n)?;

    let n_plus_one = n + 1u64;
    let s = n_plus_one.count_trailing_zeros();
    let odd_part = n_plus_one.shifted_right(s as i64)?;

    // (U_1, V_1, Q^1) = (1, P, Q) con P = 1.
    let mut lucas_u = BigInt::one();
    let mut lucas_v = BigInt::one();
    let mut q_power = q_reduced.clone();

    let bits = odd_part.bit_length();
    for bit_index in (0..bits - 1).rev() {
        lucas_u = context.mod_mul(&lucas_u, &lucas_v)?;
        let v_squared = context.mod_sqr(&lucas_v)?;
        let twice_q_power = context.mod_add(&q_power, &q_power);
        lucas_v = context.mod_sub(&v_squared, &twice_q_power);
        q_power = context.mod_sqr(&q_power)?;

        if odd_part.test_bit(bit_index as i64)? {
            let u_plus_v = context.mod_add(&lucas_u, &lucas_v);
            let d_times_u = context.mod_mul(&d_reduced, &lucas_u)?;
            let v_plus_du = context.mod_add(&lucas_v, &d_times_u);
            lucas_u = context.mod_half(&u_plus_v)?;
            lucas_v = context.mod_half(&v_plus_du)?;
            q_power = context.mod_mul(&q_power, &q_reduced)?;
        }
    }

    if lucas_u.is_zero() || lucas_v.is_zero() {
        return Ok(true);
    }
    for _ in 1..s {
        let v_squared = context.mod_sqr(&lucas_v)?;
        let twice_q_power = context.mod_add(&q_power, &q_power);
        lucas_v = context.mod_sub(&v_squared, &twice_q_power);
        if lucas_v.is_zero() {
            return Ok(true);
        }
        q_power = context.mod_sqr(&q_power)?;
    }
    Ok(false)
}

fn baillie_psw_core(n: &BigInt) -> Result<bool, BigNumError> {
    let n_minus_one = n - 1u64;
    let s = n_minus_one.count_trailing_zeros();
    let odd_part = n_minus_one.shifted_right(s as i64)?;
    let mut context = ModContext::new(n)?;

    if !miller_rabin_witness(&mut context, &n_minus_one, &odd_part, s, &BigInt::from(2u32))? {
        return Ok(false);
    }
    if is_perfect_square(n) {
        return Ok(false);
    }
    let Some(d_parameter) = selfridge_parameter(n)? else {
        return Ok(false);
    };
    strong_lucas_probable_prime(n, d_parameter)
}

/**
 * Certificación Baillie-PSW: criba pequeña, Miller-Rabin base 2 y Lucas
 * fuerte con parámetros Selfridge. Sin contraejemplo conocido.
 */
#[instrument(level = "trace", skip(n), fields(bits = n.bit_length()))]
#[must_use]
pub fn is_prime_baillie_psw(n: &BigInt) -> bool {
    if let Some(verdict) = small_prime_filter(n) {
        return verdict;
    }
    baillie_psw_core(n).unwrap_or(false)
}

fn prime_u64_checked(candidate: u64) -> Result<bool, BigNumError> {
    let n = BigInt::from(candidate);
    let n_minus_one = &n - 1u64;
    let s = n_minus_one.count_trailing_zeros();
    let odd_part = n_minus_one.shifted_right(s as i64)?;
    let mut context = ModContext::new(&n)?;

    for &base in &MILLER_RABIN_U64_BASES {
        if !miller_rabin_witness(&mut context, &n_minus_one, &odd_part, s, &BigInt::from(base))? {
            return Ok(false);
        }
    }
    Ok(true)
}

/**
 * Primalidad determinista para anchura fija: Miller-Rabin sobre las doce
 * bases Jaeschke/Sinclair, exacto para todo candidato de 64 bits.
 */
#[must_use]
pub fn is_prime_u64(candidate: u64) -> bool {
    if candidate < 2 {
        return false;
    }
    for &base in &MILLER_RABIN_U64_BASES {
        if candidate % base == 0 {
            return candidate == base;
        }
    }
    prime_u64_checked(candidate).unwrap_or(false)
}

/// Magnitud aleatoria uniforme en [0, bound) por muestreo con rechazo.
fn random_magnitude_below<R: Rng>(rng: &mut R, bound: &BigInt) -> BigInt {
    let bits = bound.bit_length();
    let limb_count = bits.div_ceil(32) as usize;
    let partial_bits = (bits % 32) as u32;
    loop {
        let mut limbs: Vec<u32> = (0..limb_count).map(|_| rng.gen::<u32>()).collect();
        if partial_bits != 0 {
            limbs[limb_count - 1] &= (1u32 << partial_bits) - 1;
        }
        let candidate = BigInt::from_sign_magnitude(false, limbs);
        if candidate < *bound {
            return candidate;
        }
    }
}

fn probable_prime_extra_rounds<R: Rng>(
    n: &BigInt,
    rounds: u32,
    rng: &mut R,
) -> Result<bool, BigNumError> {
    let n_minus_one = n - 1u64;
    let s = n_minus_one.count_trailing_zeros();
    let odd_part = n_minus_one.shifted_right(s as i64)?;
    let mut context = ModContext::new(n)?;

    // Bases uniformes en [2, n - 2].
    let base_span = n - 3u64;
    for _ in 0..rounds {
        let base = random_magnitude_below(rng, &base_span) + 2u64;
        if !miller_rabin_witness(&mut context, &n_minus_one, &odd_part, s, &base)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/**
 * Veredicto Baillie-PSW reforzado con rondas Miller-Rabin de base
 * aleatoria uniforme en [2, n - 2].
 */
pub fn is_probable_prime<R: Rng>(n: &BigInt, extra_rounds: u32, rng: &mut R) -> bool {
    if !is_prime_baillie_psw(n) {
        return false;
    }
    if extra_rounds == 0 || n.bit_length() <= 2 {
        return true;
    }
    probable_prime_extra_rounds(n, extra_rounds, rng).unwrap_or(false)
}
