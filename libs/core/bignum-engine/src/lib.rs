// [libs/core/bignum-engine/src/lib.rs]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

/*!
 * =================================================================
 * APARATO: BIGNUM MASTER HUB (V4.0 - SOVEREIGN SYNC)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ORQUESTACIÓN DE PRIMITIVAS DE PRECISIÓN ARBITRARIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL SURFACE: Valor inmutable (BigInt) para el álgebra funcional y
 *    acumulador mutable para el trabajo iterativo de asignación
 *    amortizada cero; ambos sobre el mismo kernel de limbs u32.
 * 2. NOMINAL PRELUDE: Única autoridad de importación para los estratos
 *    superiores; centraliza la nomenclatura nominal.
 * 3. PURE PORTABILITY: Cero 'unsafe'; las cadenas de acarreo viajan en
 *    acumuladores u64/u128 bit-perfectos en cualquier arquitectura.
 *
 * # Mathematical Proof (Layering):
 * El kernel opera sobre magnitudes puras con longitudes explícitas; el
 * signo vive exclusivamente en el descriptor empaquetado. Toda operación
 * pública preserva la forma canónica: longitud 0 o limb superior no nulo.
 * =================================================================
 */

/// Acumulador mutable con buffers reutilizables y protocolo de swap.
pub mod accumulator;
/// Kernel de suma, resta y comparación sobre limbs u32 little-endian.
pub mod arithmetic;
/// Valor inmutable con signo y superficie algebraica plena.
pub mod big_integer;
/// Serialización binaria en complemento a dos y vistas de limbs.
pub mod binary_codec;
/// Desplazamientos y primitivas de bit sobre magnitudes.
pub mod bitwise;
/// División: divisores de 1 y 2 limbs, Algoritmo D de Knuth y atajos.
pub mod division;
/// Catálogo de fallos numéricos del sistema.
pub mod errors;
/// Cuadrado recursivo Karatsuba para operandos largos.
pub mod karatsuba;
/// Descriptor empaquetado de signo y longitud normalizada.
pub mod meta;
/// Contexto de aritmética modular con scratch residente.
pub mod modular;
/// Productos escolares y cuadrado simétrico del kernel.
pub mod multiplication;
/// Análisis decimal y hexadecimal sobre fuentes de dígitos polimórficas.
pub mod parser;
/// Certificación de primalidad Baillie-PSW y símbolo de Jacobi.
pub mod primality;
/// Emisión decimal (recíproco de Barrett) y hexadecimal configurable.
pub mod printer;

/**
 * PRELUDIO NUMÉRICO SOBERANO
 *
 * Única autoridad de importación autorizada para los estratos superiores.
 * Centraliza la nomenclatura nominal del motor.
 */
pub mod prelude {
    // Superficie de valor y acumulación
    pub use crate::accumulator::{Accumulator, AsOperand, Operand, MINIMUM_PRIMARY_LIMBS};
    pub use crate::big_integer::BigInt;
    pub use crate::meta::SignedMeta;

    // Kernel de limbs (longitudes explícitas)
    pub use crate::arithmetic::{
        add_assign_slices, add_assign_u64, add_into, compare_magnitude_with_u64,
        compare_magnitudes, normalized_length, round_to_quantum, LIMB_QUANTUM,
    };
    pub use crate::bitwise::{
        bit_length, count_one_bits, count_trailing_zeros, extract_u64_at_bit_index,
        shift_left_into, shift_right_into, test_any_bit_in_lower_n, test_bit,
    };
    pub use crate::division::{
        div_rem_by_u32, div_rem_by_u64, div_rem_knuth, rem_by_u32, rem_by_u64,
        try_div_fast_path, FastDivOutcome,
    };
    pub use crate::karatsuba::{square_scratch_length, SQUARE_KARATSUBA_THRESHOLD};
    pub use crate::multiplication::{mul_by_u32_into, mul_by_u64_into, mul_into};

    // Codec textual y binario
    pub use crate::parser::{parse_hex_integer, parse_integer, ByteSource, CharSource, DigitSource};
    pub use crate::printer::{decimal_digit_bound, HexFormat};

    // Aritmética modular y primalidad
    pub use crate::errors::BigNumError;
    pub use crate::modular::ModContext;
    pub use crate::primality::{
        is_prime_baillie_psw, is_prime_u64, is_probable_prime, jacobi_symbol,
    };
}
