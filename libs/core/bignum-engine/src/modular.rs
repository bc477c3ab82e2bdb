// [libs/core/bignum-engine/src/modular.rs]
/*!
 * =================================================================
 * APARATO: MODULAR ARITHMETIC CONTEXT (V3.0 - WARM SCRATCH)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ARITMÉTICA MODULO N CON BUFFERS RESIDENTES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RESIDENT ACCUMULATORS: El contexto retiene dos acumuladores calientes
 *    (producto/reducción y exponenciación) para que el exponenciador
 *    opere con asignación amortizada cero.
 * 2. REDUCED OPERAND CONTRACT: mod_add y mod_sub asumen operandos ya
 *    reducidos; una única comparación-resta (o reposición) los acota.
 * 3. ODD HALVING: mod_half implementa (x + n)/2 para x impar: la regla
 *    de mitad modular sobre módulos impares de las secuencias de Lucas.
 * =================================================================
 */

use std::cmp::Ordering;

use crate::accumulator::Accumulator;
use crate::big_integer::BigInt;
use crate::errors::BigNumError;

/**
 * Contexto de aritmética modular: posee el módulo y el scratch reusable
 * de todas las operaciones.
 */
#[derive(Debug)]
pub struct ModContext {
    modulus: BigInt,
    work: Accumulator,
    power: Accumulator,
}

impl ModContext {
    /**
     * Construye el contexto sobre un módulo estrictamente positivo.
     *
     * # Errors:
     * 'DivisionByZero' ante módulo nulo; 'NegativeModulus' ante módulo
     * negativo.
     */
    pub fn new(modulus: &BigInt) -> Result<Self, BigNumError> {
        if modulus.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        if modulus.is_negative() {
            return Err(BigNumError::NegativeModulus);
        }
        Ok(Self {
            modulus: modulus.clone(),
            work: Accumulator::new(),
            power: Accumulator::new(),
        })
    }

    /// Módulo del contexto.
    #[inline]
    #[must_use]
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// (a + b) mod n para operandos ya reducidos.
    #[must_use]
    pub fn mod_add(&mut self, a: &BigInt, b: &BigInt) -> BigInt {
        self.work.set_add(a, b);
        if self.work.compare_to(&self.modulus) != Ordering::Less {
            self.work.sub_assign_operand(&self.modulus);
        }
        self.work.to_big_integer()
    }

    /// (a - b) mod n para operandos ya reducidos.
    #[must_use]
    pub fn mod_sub(&mut self, a: &BigInt, b: &BigInt) -> BigInt {
        self.work.set_sub(a, b);
        if self.work.is_negative() {
            self.work.add_assign_operand(&self.modulus);
        }
        self.work.to_big_integer()
    }

    /**
     * (a · b) mod n.
     *
     * # Errors:
     * Propaga los fallos del kernel de división (imposibles con el módulo
     * validado en la construcción).
     */
    pub fn mod_mul(&mut self, a: &BigInt, b: &BigInt) -> Result<BigInt, BigNumError> {
        self.work.set_mul(a, b);
        self.work.rem_assign_operand(&self.modulus)?;
        Ok(self.work.to_big_integer())
    }

    /**
     * a² mod n, vía el cuadrado Karatsuba del acumulador.
     *
     * # Errors:
     * Propaga los fallos del kernel de división.
     */
    pub fn mod_sqr(&mut self, a: &BigInt) -> Result<BigInt, BigNumError> {
        self.work.set_value(a);
        self.work.square_in_place();
        self.work.rem_assign_operand(&self.modulus)?;
        Ok(self.work.to_big_integer())
    }

    /**
     * Mitad modular sobre módulo impar: (x + n)/2 si x es impar, x/2 en
     * caso contrario.
     *
     * # Errors:
     * Propaga los fallos de los argumentos de bit.
     */
    pub fn mod_half(&mut self, value: &BigInt) -> Result<BigInt, BigNumError> {
        self.work.set_value(value);
        if value.test_bit(0)? {
            self.work.add_assign_operand(&self.modulus);
        }
        self.work.shr_assign_bits(1)?;
        Ok(self.work.to_big_integer())
    }

    /**
     * base^exponent mod n por cuadrado-y-multiplicación de izquierda a
     * derecha sobre el acumulador de potencias.
     *
     * # Errors:
     * 'NegativeArgument' ante exponente negativo.
     */
    pub fn mod_pow(&mut self, base: &BigInt, exponent: &BigInt) -> Result<BigInt, BigNumError> {
        if exponent.is_negative() {
            return Err(BigNumError::NegativeArgument("exponent"));
        }
        if self.modulus == BigInt::one() {
            return Ok(BigInt::zero());
        }
        let reduced_base = base.modulus(&self.modulus)?;
        if exponent.is_zero() {
            return Ok(BigInt::one());
        }
        if reduced_base.is_zero() {
            return Ok(BigInt::zero());
        }

        self.power.set_value(&reduced_base);
        let bits = exponent.bit_length();
        for bit_index in (0..bits - 1).rev() {
            self.power.square_in_place();
            self.power.rem_assign_operand(&self.modulus)?;
            if exponent.test_bit(bit_index as i64)? {
                self.power.mul_assign_operand(&reduced_base);
                self.power.rem_assign_operand(&self.modulus)?;
            }
        }
        Ok(self.power.to_big_integer())
    }
}
