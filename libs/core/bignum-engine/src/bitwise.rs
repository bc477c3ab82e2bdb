// [libs/core/bignum-engine/src/bitwise.rs]
/*!
 * =================================================================
 * APARATO: LIMB BITWISE KERNEL (V3.4 - SHIFT SOVEREIGN)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: DESPLAZAMIENTOS Y PRIMITIVAS DE BIT SOBRE MAGNITUDES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SPLIT SHIFT: Todo desplazamiento se descompone en un salto de limbs
 *    (bit_count / 32) más un desplazamiento intra-limb (5 bits bajos).
 * 2. IN-PLACE LEGALITY: Las formas '_in_place' recorren el buffer en el
 *    orden que garantiza lecturas previas a toda escritura.
 * 3. MAGNITUDE ONLY: Este estrato opera sobre magnitudes puras; el ajuste
 *    aritmético del desplazamiento a la derecha de negativos vive en el
 *    estrato de valor.
 * =================================================================
 */

use crate::arithmetic::normalized_length;

/**
 * Desplazamiento a la izquierda sin aliasing: dest = x << bit_count.
 * El destino debe medir al menos x_len + bit_count/32 + 1 limbs.
 */
pub fn shift_left_into(dest: &mut [u32], x: &[u32], x_len: usize, bit_count: usize) -> usize {
    if x_len == 0 {
        return 0;
    }
    let limb_shift = bit_count / 32;
    let intra_shift = (bit_count % 32) as u32;

    if intra_shift == 0 {
        for index in (0..x_len).rev() {
            dest[index + limb_shift] = x[index];
        }
        for limb in dest[..limb_shift].iter_mut() {
            *limb = 0;
        }
        return x_len + limb_shift;
    }

    dest[x_len + limb_shift] = x[x_len - 1] >> (32 - intra_shift);
    for index in (1..x_len).rev() {
        dest[index + limb_shift] = (x[index] << intra_shift) | (x[index - 1] >> (32 - intra_shift));
    }
    dest[limb_shift] = x[0] << intra_shift;
    for limb in dest[..limb_shift].iter_mut() {
        *limb = 0;
    }
    normalized_length(dest, x_len + limb_shift + 1)
}

/**
 * Desplazamiento a la izquierda en sitio. El buffer debe medir al menos
 * length + bit_count/32 + 1 limbs; el recorrido descendente garantiza que
 * cada limb se lee antes de ser sobreescrito.
 */
pub fn shift_left_in_place(buffer: &mut [u32], length: usize, bit_count: usize) -> usize {
    if length == 0 {
        return 0;
    }
    let limb_shift = bit_count / 32;
    let intra_shift = (bit_count % 32) as u32;

    if intra_shift == 0 {
        if limb_shift == 0 {
            return length;
        }
        for index in (0..length).rev() {
            buffer[index + limb_shift] = buffer[index];
        }
        for limb in buffer[..limb_shift].iter_mut() {
            *limb = 0;
        }
        return length + limb_shift;
    }

    buffer[length + limb_shift] = buffer[length - 1] >> (32 - intra_shift);
    for index in (1..length).rev() {
        buffer[index + limb_shift] =
            (buffer[index] << intra_shift) | (buffer[index - 1] >> (32 - intra_shift));
    }
    buffer[limb_shift] = buffer[0] << intra_shift;
    for limb in buffer[..limb_shift].iter_mut() {
        *limb = 0;
    }
    normalized_length(buffer, length + limb_shift + 1)
}

/**
 * Desplazamiento lógico a la derecha sin aliasing: dest = x >> bit_count.
 * La imagen especular sobre la magnitud; la semántica de complemento a dos
 * para negativos se aplica un estrato más arriba.
 */
pub fn shift_right_into(dest: &mut [u32], x: &[u32], x_len: usize, bit_count: usize) -> usize {
    let limb_shift = bit_count / 32;
    if limb_shift >= x_len {
        return 0;
    }
    let intra_shift = (bit_count % 32) as u32;
    let surviving = x_len - limb_shift;

    if intra_shift == 0 {
        for index in 0..surviving {
            dest[index] = x[index + limb_shift];
        }
        return normalized_length(dest, surviving);
    }

    for index in 0..surviving - 1 {
        dest[index] =
            (x[index + limb_shift] >> intra_shift) | (x[index + limb_shift + 1] << (32 - intra_shift));
    }
    dest[surviving - 1] = x[x_len - 1] >> intra_shift;
    normalized_length(dest, surviving)
}

/// Desplazamiento lógico a la derecha en sitio (recorrido ascendente).
pub fn shift_right_in_place(buffer: &mut [u32], length: usize, bit_count: usize) -> usize {
    let limb_shift = bit_count / 32;
    if limb_shift >= length {
        return 0;
    }
    let intra_shift = (bit_count % 32) as u32;
    let surviving = length - limb_shift;

    if intra_shift == 0 {
        if limb_shift == 0 {
            return length;
        }
        for index in 0..surviving {
            buffer[index] = buffer[index + limb_shift];
        }
        return normalized_length(buffer, surviving);
    }

    for index in 0..surviving - 1 {
        buffer[index] = (buffer[index + limb_shift] >> intra_shift)
            | (buffer[index + limb_shift + 1] << (32 - intra_shift));
    }
    buffer[surviving - 1] = buffer[length - 1] >> intra_shift;
    normalized_length(buffer, surviving)
}

/// Interroga el bit 'bit_index' de la magnitud.
#[inline]
#[must_use]
pub fn test_bit(limbs: &[u32], length: usize, bit_index: u64) -> bool {
    let limb_index = (bit_index / 32) as usize;
    if limb_index >= length {
        return false;
    }
    limbs[limb_index] >> (bit_index % 32) & 1 == 1
}

/// Enciende el bit 'bit_index'. El llamador garantiza capacidad suficiente.
#[inline]
pub fn set_bit_in(limbs: &mut [u32], bit_index: u64) {
    limbs[(bit_index / 32) as usize] |= 1u32 << (bit_index % 32);
}

/// Apaga el bit 'bit_index' si cae dentro del buffer.
#[inline]
pub fn clear_bit_in(limbs: &mut [u32], length: usize, bit_index: u64) {
    let limb_index = (bit_index / 32) as usize;
    if limb_index < length {
        limbs[limb_index] &= !(1u32 << (bit_index % 32));
    }
}

/**
 * Conteo de ceros al final (bit menos significativo primero).
 * Una magnitud nula reporta 0; el llamador filtra ese caso.
 */
#[must_use]
pub fn count_trailing_zeros(limbs: &[u32], length: usize) -> u64 {
    for index in 0..length {
        if limbs[index] != 0 {
            return index as u64 * 32 + limbs[index].trailing_zeros() as u64;
        }
    }
    0
}

/// Población total de bits encendidos en la magnitud.
#[must_use]
pub fn count_one_bits(limbs: &[u32], length: usize) -> u64 {
    limbs[..length]
        .iter()
        .map(|limb| limb.count_ones() as u64)
        .sum()
}

/// Longitud en bits de la magnitud: posición del bit más alto encendido + 1.
#[inline]
#[must_use]
pub fn bit_length(limbs: &[u32], length: usize) -> u64 {
    if length == 0 {
        return 0;
    }
    length as u64 * 32 - limbs[length - 1].leading_zeros() as u64
}

/**
 * Extrae una ventana de 64 bits comenzando en 'bit_index'. Los bits por
 * encima de la magnitud se leen como 0. Requerida por el exponenciador
 * modular y por las conversiones de anchura fija.
 */
#[must_use]
pub fn extract_u64_at_bit_index(limbs: &[u32], length: usize, bit_index: u64) -> u64 {
    let limb_index = (bit_index / 32) as usize;
    let intra_shift = (bit_index % 32) as u32;
    let fetch = |index: usize| -> u64 {
        if index < length {
            limbs[index] as u64
        } else {
            0
        }
    };

    let window = fetch(limb_index) | (fetch(limb_index + 1) << 32);
    if intra_shift == 0 {
        window
    } else {
        (window >> intra_shift) | (fetch(limb_index + 2) << (64 - intra_shift))
    }
}

/// Verdadero si alguno de los 'n_bits' bajos de la magnitud está encendido.
#[must_use]
pub fn test_any_bit_in_lower_n(limbs: &[u32], length: usize, n_bits: u64) -> bool {
    let full_limbs = (n_bits / 32) as usize;
    let partial_bits = (n_bits % 32) as u32;

    for &limb in &limbs[..full_limbs.min(length)] {
        if limb != 0 {
            return true;
        }
    }
    if partial_bits != 0 && full_limbs < length {
        return limbs[full_limbs] & ((1u32 << partial_bits) - 1) != 0;
    }
    false
}
