// [libs/core/bignum-engine/src/errors.rs]
/*!
 * =================================================================
 * APARATO: BIGNUM ERROR CATALOG (V4.0 - SOBERANO)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS NUMÉRICOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STRATUM TAGGING: Cada variante lleva el prefijo [L1_BIGNUM_FAULT]
 *    para su renderizado cromático en los tableros de auditoría.
 * 2. USER/CONTRACT SPLIT: 'InvalidState' señala una violación de contrato
 *    interno del kernel de limbs; jamás debe alcanzar al consumidor final.
 * 3. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta.
 * =================================================================
 */

use thiserror::Error;

/// Catálogo de fallos del motor de precisión arbitraria.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BigNumError {
    /// División o módulo contra un divisor nulo.
    #[error("[L1_BIGNUM_FAULT]: DIVISION_BY_ZERO")]
    DivisionByZero,

    /// El operador de módulo exige un divisor estrictamente positivo.
    #[error("[L1_BIGNUM_FAULT]: NEGATIVE_MODULUS")]
    NegativeModulus,

    /// Conteo de bits, índice de bit o anchura negativa.
    #[error("[L1_BIGNUM_FAULT]: NEGATIVE_ARGUMENT -> {0}")]
    NegativeArgument(&'static str),

    /// Conversión exacta hacia una anchura fija que no contiene el valor.
    #[error("[L1_BIGNUM_FAULT]: OUT_OF_RANGE -> {0}")]
    OutOfRange(&'static str),

    /// Entrada textual malformada durante el análisis decimal o hexadecimal.
    #[error("[L1_BIGNUM_FAULT]: PARSE_REJECTED -> {0}")]
    ParseError(String),

    /// Violación de un invariante interno del kernel. Indica un bug, no un
    /// error de uso.
    #[error("[L1_BIGNUM_FAULT]: INVALID_INTERNAL_STATE -> {0}")]
    InvalidState(&'static str),
}
