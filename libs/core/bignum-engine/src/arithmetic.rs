// [libs/core/bignum-engine/src/arithmetic.rs]
/*!
 * =================================================================
 * APARATO: LIMB ARITHMETIC KERNEL (V5.3 - CARRY SOVEREIGN)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: SUMA, RESTA Y COMPARACIÓN SOBRE LIMBS U32 LITTLE-ENDIAN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. EXPLICIT LENGTHS: Toda rutina recibe la longitud normalizada de cada
 *    operando; los slices pueden portar limbs residuales por encima de ella.
 * 2. ALIASING PROTOCOL: Las formas '_into' exigen destino disjunto; las
 *    formas '_assign' son la versión legal del aliasing destino==operando.
 * 3. PORTABLE CARRY CHAIN: Acarreo y préstamo viajan en acumuladores u64,
 *    sin ensamblador, bit-perfectos en cualquier arquitectura.
 *
 * # Mathematical Proof (Carry Propagation):
 * Cada limb aporta M[i] · 2^(32·i). La suma de dos limbs más un acarreo
 * entrante cabe en 33 bits; el acumulador u64 preserva el excedente que
 * se desplaza 32 posiciones hacia el siguiente limb.
 * =================================================================
 */

use std::cmp::Ordering;

/// Cuanto de asignación: los buffers crecen en múltiplos de 4 limbs.
pub const LIMB_QUANTUM: usize = 4;

/**
 * Longitud normalizada de una magnitud: escanea desde 'upper_bound - 1'
 * hacia abajo descartando limbs nulos.
 */
#[inline(always)]
#[must_use]
pub fn normalized_length(limbs: &[u32], upper_bound: usize) -> usize {
    let mut length = upper_bound;
    while length > 0 && limbs[length - 1] == 0 {
        length -= 1;
    }
    length
}

/**
 * Comparación lexicográfica sin signo, limb más significativo primero.
 * Precondición: ambos operandos normalizados.
 */
#[must_use]
pub fn compare_magnitudes(a: &[u32], a_len: usize, b: &[u32], b_len: usize) -> Ordering {
    if a_len != b_len {
        return a_len.cmp(&b_len);
    }
    for index in (0..a_len).rev() {
        match a[index].cmp(&b[index]) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/**
 * Compara una magnitud normalizada contra un escalar de 64 bits tratado
 * como un literal little-endian de 2 limbs.
 */
#[must_use]
pub fn compare_magnitude_with_u64(a: &[u32], a_len: usize, value: u64) -> Ordering {
    if a_len > 2 {
        return Ordering::Greater;
    }
    let mut composed: u64 = 0;
    for index in (0..a_len).rev() {
        composed = (composed << 32) | a[index] as u64;
    }
    composed.cmp(&value)
}

/// Descompone un escalar de 64 bits en su literal de 2 limbs normalizado.
#[inline(always)]
fn scalar_limbs(value: u64) -> ([u32; 2], usize) {
    let limbs = [value as u32, (value >> 32) as u32];
    let length = if limbs[1] != 0 {
        2
    } else if limbs[0] != 0 {
        1
    } else {
        0
    };
    (limbs, length)
}

/**
 * Suma sin aliasing: dest = x + y. El destino debe medir al menos
 * max(x_len, y_len) + 1 limbs. Retorna la longitud normalizada.
 */
pub fn add_into(dest: &mut [u32], x: &[u32], x_len: usize, y: &[u32], y_len: usize) -> usize {
    let (long, long_len, short, short_len) = if x_len >= y_len {
        (x, x_len, y, y_len)
    } else {
        (y, y_len, x, x_len)
    };

    let mut carry: u64 = 0;
    for index in 0..short_len {
        carry += long[index] as u64 + short[index] as u64;
        dest[index] = carry as u32;
        carry >>= 32;
    }
    for index in short_len..long_len {
        carry += long[index] as u64;
        dest[index] = carry as u32;
        carry >>= 32;
    }
    dest[long_len] = carry as u32;
    normalized_length(dest, long_len + 1)
}

/**
 * Suma con aliasing legal: acc = acc + y. El buffer debe medir al menos
 * max(acc_len, y_len) + 1 limbs.
 */
pub fn add_assign_slices(acc: &mut [u32], acc_len: usize, y: &[u32], y_len: usize) -> usize {
    let common = acc_len.min(y_len);
    let mut carry: u64 = 0;
    for index in 0..common {
        carry += acc[index] as u64 + y[index] as u64;
        acc[index] = carry as u32;
        carry >>= 32;
    }
    if y_len > acc_len {
        for index in common..y_len {
            carry += y[index] as u64;
            acc[index] = carry as u32;
            carry >>= 32;
        }
    } else {
        let mut index = common;
        while carry != 0 && index < acc_len {
            carry += acc[index] as u64;
            acc[index] = carry as u32;
            carry >>= 32;
            index += 1;
        }
    }
    let upper = acc_len.max(y_len);
    if carry != 0 {
        acc[upper] = carry as u32;
        return upper + 1;
    }
    normalized_length(acc, upper)
}

/// Variante escalar de la suma en sitio: acc = acc + value.
pub fn add_assign_u64(acc: &mut [u32], acc_len: usize, value: u64) -> usize {
    let (limbs, length) = scalar_limbs(value);
    add_assign_slices(acc, acc_len, &limbs, length)
}

/**
 * Resta sin aliasing: dest = x - y. Contrato del llamador: |x| >= |y|,
 * verificado por pre-comparación en el estrato de despacho con signo.
 */
pub fn sub_into(dest: &mut [u32], x: &[u32], x_len: usize, y: &[u32], y_len: usize) -> usize {
    debug_assert!(compare_magnitudes(x, x_len, y, y_len) != Ordering::Less);

    let mut borrow: u64 = 0;
    for index in 0..y_len {
        let difference = (x[index] as u64)
            .wrapping_sub(y[index] as u64)
            .wrapping_sub(borrow);
        dest[index] = difference as u32;
        borrow = (difference >> 32) & 1;
    }
    for index in y_len..x_len {
        let difference = (x[index] as u64).wrapping_sub(borrow);
        dest[index] = difference as u32;
        borrow = (difference >> 32) & 1;
    }
    debug_assert_eq!(borrow, 0);
    normalized_length(dest, x_len)
}

/// Resta con aliasing legal: acc = acc - y. Contrato: |acc| >= |y|.
pub fn sub_assign_slices(acc: &mut [u32], acc_len: usize, y: &[u32], y_len: usize) -> usize {
    debug_assert!(compare_magnitudes(acc, acc_len, y, y_len) != Ordering::Less);

    let mut borrow: u64 = 0;
    for index in 0..y_len {
        let difference = (acc[index] as u64)
            .wrapping_sub(y[index] as u64)
            .wrapping_sub(borrow);
        acc[index] = difference as u32;
        borrow = (difference >> 32) & 1;
    }
    let mut index = y_len;
    while borrow != 0 && index < acc_len {
        let difference = (acc[index] as u64).wrapping_sub(borrow);
        acc[index] = difference as u32;
        borrow = (difference >> 32) & 1;
        index += 1;
    }
    debug_assert_eq!(borrow, 0);
    normalized_length(acc, acc_len)
}

/**
 * Resta invertida con aliasing legal: acc = x - acc. Contrato: |x| >= |acc|.
 * Requerida por el acumulador cuando el minuendo es el operando externo.
 */
pub fn rsub_assign_slices(acc: &mut [u32], acc_len: usize, x: &[u32], x_len: usize) -> usize {
    debug_assert!(compare_magnitudes(x, x_len, acc, acc_len) != Ordering::Less);

    let mut borrow: u64 = 0;
    for index in 0..acc_len {
        let difference = (x[index] as u64)
            .wrapping_sub(acc[index] as u64)
            .wrapping_sub(borrow);
        acc[index] = difference as u32;
        borrow = (difference >> 32) & 1;
    }
    for index in acc_len..x_len {
        let difference = (x[index] as u64).wrapping_sub(borrow);
        acc[index] = difference as u32;
        borrow = (difference >> 32) & 1;
    }
    debug_assert_eq!(borrow, 0);
    normalized_length(acc, x_len)
}

/// Variante escalar de la resta en sitio: acc = acc - value.
pub fn sub_assign_u64(acc: &mut [u32], acc_len: usize, value: u64) -> usize {
    let (limbs, length) = scalar_limbs(value);
    sub_assign_slices(acc, acc_len, &limbs, length)
}

/// Redondea una longitud solicitada al cuanto de asignación de 4 limbs.
#[inline(always)]
#[must_use]
pub fn round_to_quantum(requested: usize) -> usize {
    requested
        .max(1)
        .div_ceil(LIMB_QUANTUM)
        .saturating_mul(LIMB_QUANTUM)
}
