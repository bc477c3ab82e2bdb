// [libs/core/bignum-engine/src/karatsuba.rs]
/*!
 * =================================================================
 * APARATO: KARATSUBA SQUARING ENGINE (V2.0 - SPLIT RECURSIVE)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CUADRADO RECURSIVO PARA OPERANDOS LARGOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. THREE-HALVES RECURSION: Un cuadrado de n limbs se reduce a tres
 *    cuadrados de ~n/2 limbs, bajando el coste de O(n²) a O(n^1.585).
 * 2. SCRATCH DISCIPLINE: Cada nivel consume exactamente 3·k1 + 3 limbs
 *    de scratch (suma k1+1, cuadrado medio 2·k1+2) y delega el resto a
 *    la recursión del término medio.
 * 3. SCHOOLBOOK FLOOR: Bajo el umbral, el cuadrado escolar simétrico es
 *    más barato que la contabilidad de la partición.
 *
 * # Mathematical Proof (Assembly):
 * Con B = 2^32, k0 = n/2 y k1 = n - k0:
 *   x = x_lo + x_hi·B^k0
 *   x² = x_lo² + ((x_lo + x_hi)² - x_lo² - x_hi²)·B^k0 + x_hi²·B^(2k0)
 * El término medio nunca es negativo: (x_lo + x_hi)² >= x_lo² + x_hi².
 * =================================================================
 */

use crate::arithmetic::{add_assign_slices, add_into, normalized_length, sub_assign_slices};
use crate::multiplication::schoolbook_square_into;

/// Umbral de retroceso al cuadrado escolar, en limbs.
pub const SQUARE_KARATSUBA_THRESHOLD: usize = 32;

/**
 * Limbs de scratch requeridos para cuadrar una magnitud de n limbs:
 * 3·k1 + 3 del nivel actual más la demanda recursiva del término medio.
 */
#[must_use]
pub fn square_scratch_length(n: usize) -> usize {
    if n <= SQUARE_KARATSUBA_THRESHOLD {
        return 0;
    }
    let k1 = n - n / 2;
    3 * k1 + 3 + square_scratch_length(k1 + 1)
}

/**
 * Cuadrado recursivo: dest = x².
 *
 * Contratos: dest llega pre-anulado sobre 2·x.len() limbs y jamás se
 * solapa con x; scratch mide al menos square_scratch_length(x.len()).
 * Retorna la longitud normalizada del cuadrado.
 */
pub fn square_into(dest: &mut [u32], x: &[u32], scratch: &mut [u32]) -> usize {
    let n = x.len();
    if n == 0 {
        return 0;
    }
    if n <= SQUARE_KARATSUBA_THRESHOLD {
        return schoolbook_square_into(dest, x);
    }

    let k0 = n / 2;
    let k1 = n - k0;
    let (x_low, x_high) = x.split_at(k0);
    let x_low_len = normalized_length(x_low, k0);

    // Cuadrados extremos directamente sobre las mitades del destino.
    {
        let (dest_low, dest_high) = dest[..2 * n].split_at_mut(2 * k0);
        square_into(dest_low, &x_low[..x_low_len], scratch);
        square_into(dest_high, x_high, scratch);
    }

    // s = x_lo + x_hi, y su cuadrado, en el scratch del nivel.
    let (sum_area, remainder_area) = scratch.split_at_mut(k1 + 1);
    let sum_len = add_into(sum_area, x_high, k1, x_low, x_low_len);

    let (middle_area, deeper_scratch) = remainder_area.split_at_mut(2 * k1 + 2);
    for limb in middle_area.iter_mut() {
        *limb = 0;
    }
    let mut middle_len = square_into(middle_area, &sum_area[..sum_len], deeper_scratch);

    // z_mid = s² - z_lo - z_hi.
    let z_low_len = normalized_length(&dest[..2 * k0], 2 * k0);
    middle_len = sub_assign_slices(middle_area, middle_len, &dest[..2 * k0], z_low_len);
    let z_high_len = normalized_length(&dest[2 * k0..2 * n], 2 * k1);
    middle_len = sub_assign_slices(middle_area, middle_len, &dest[2 * k0..2 * n], z_high_len);

    // Ensamblado: dest += z_mid · B^k0.
    let tail_len = normalized_length(&dest[k0..2 * n], 2 * n - k0);
    add_assign_slices(&mut dest[k0..2 * n], tail_len, &middle_area[..middle_len], middle_len);

    normalized_length(dest, 2 * n)
}
