// [libs/core/bignum-engine/src/accumulator.rs]
/*!
 * =================================================================
 * APARATO: MUTABLE ACCUMULATOR ENGINE (V9.1 - ZERO-ALLOC STEADY STATE)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: ÁLGEBRA EN SITIO CON BUFFERS REUTILIZABLES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. THREE-BUFFER OWNERSHIP: primario (mínimo 4 limbs) más tmp1/tmp2
 *    perezosos; adquiridos bajo demanda, liberados junto al acumulador.
 * 2. SWAP PROTOCOL: el producto multi-limb y el cuadrado escriben en tmp1
 *    y luego intercambian los buffers propietarios (swap de punteros, sin
 *    movimiento de datos); el valor previo sobrevive en el nuevo tmp1
 *    para los pasos de seguimiento que lo requieran.
 * 3. GROWTH LAW: primera reasignación exacta al mínimo solicitado;
 *    las subsiguientes añaden un 50% de holgura; todo redondeado al
 *    cuanto de 4 limbs. La capacidad jamás decrece.
 * 4. OPERAND DISPATCH: anchos fijos con signo se parten en bandera +
 *    magnitud sin signo vía 'unsigned_abs', inmune al mínimo negativo.
 *
 * # Mathematical Proof (Amortized Zero Allocation):
 * Con holgura geométrica del 50%, una secuencia de n operaciones de
 * tamaño acotado ejecuta O(log n) reasignaciones; el estado caliente
 * opera exclusivamente sobre los tres buffers residentes.
 * =================================================================
 */

use std::cmp::Ordering;
use std::ops::{AddAssign, MulAssign, SubAssign};

use tracing::trace;

use crate::arithmetic::{
    add_assign_slices, add_assign_u64, compare_magnitude_with_u64, compare_magnitudes,
    normalized_length, round_to_quantum, rsub_assign_slices, sub_assign_slices, sub_assign_u64,
};
use crate::big_integer::BigInt;
use crate::bitwise::{
    self, shift_left_in_place, shift_right_in_place, test_any_bit_in_lower_n,
};
use crate::division::{
    div_rem_by_u64_in_place, div_rem_knuth, try_div_fast_path, FastDivOutcome,
};
use crate::errors::BigNumError;
use crate::karatsuba;
use crate::meta::SignedMeta;
use crate::multiplication::{mul_by_u64_into, mul_into, mul_u32_in_place};

/// Tamaño mínimo del buffer primario, en limbs.
pub const MINIMUM_PRIMARY_LIMBS: usize = 4;

/**
 * Vista prestada de un operando aritmético: escalar de hasta 64 bits o
 * magnitud de precisión arbitraria, siempre como (signo, magnitud).
 */
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Escalar de anchura fija ya descompuesto en signo + magnitud u64.
    Small {
        /// Bandera de signo del escalar.
        negative: bool,
        /// Magnitud sin signo, ya ensanchada a 64 bits.
        magnitude: u64,
    },
    /// Magnitud little-endian prestada de un valor o de otro acumulador.
    Big {
        /// Bandera de signo del operando.
        negative: bool,
        /// Limbs vivos de la magnitud, normalizados.
        limbs: &'a [u32],
    },
}

impl Operand<'_> {
    /// Verdadero para el operando nulo.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Operand::Small { magnitude, .. } => *magnitude == 0,
            Operand::Big { limbs, .. } => limbs.is_empty(),
        }
    }

    /// Bandera de signo del operando.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Operand::Small { negative, .. } => *negative,
            Operand::Big { negative, .. } => *negative,
        }
    }
}

/// Capacidad de prestarse como operando del despacho aritmético.
pub trait AsOperand {
    /// Vista (signo, magnitud) del valor, sin asignación de memoria.
    fn as_operand(&self) -> Operand<'_>;
}

impl AsOperand for u32 {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Small {
            negative: false,
            magnitude: *self as u64,
        }
    }
}

impl AsOperand for u64 {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Small {
            negative: false,
            magnitude: *self,
        }
    }
}

impl AsOperand for i32 {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Small {
            negative: *self < 0,
            magnitude: self.unsigned_abs() as u64,
        }
    }
}

impl AsOperand for i64 {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Small {
            negative: *self < 0,
            magnitude: self.unsigned_abs(),
        }
    }
}

impl AsOperand for BigInt {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Big {
            negative: self.is_negative(),
            limbs: self.magnitude_limbs(),
        }
    }
}

impl AsOperand for Accumulator {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Big {
            negative: self.meta.is_negative(),
            limbs: &self.primary[..self.meta.normalized_length()],
        }
    }
}

/**
 * Materializa la magnitud de un operando como slice de limbs y delega en
 * el cuerpo. Los escalares viven en un literal de 2 limbs sobre la pila.
 */
fn with_operand_magnitude<R>(operand: Operand<'_>, body: impl FnOnce(bool, &[u32]) -> R) -> R {
    match operand {
        Operand::Small {
            negative,
            magnitude,
        } => {
            let limbs = [magnitude as u32, (magnitude >> 32) as u32];
            let length = if limbs[1] != 0 {
                2
            } else if limbs[0] != 0 {
                1
            } else {
                0
            };
            body(negative, &limbs[..length])
        }
        Operand::Big { negative, limbs } => body(negative, limbs),
    }
}

/**
 * Acumulador mutable: signo + buffer primario + dos buffers de scratch.
 *
 * La igualdad se define únicamente contra tipos numéricos concretos y
 * contra BigInt; el hash queda deliberadamente sin implementar: un
 * acumulador jamás debe oficiar de llave en colecciones hasheadas.
 */
#[derive(Debug)]
pub struct Accumulator {
    meta: SignedMeta,
    primary: Vec<u32>,
    tmp1: Vec<u32>,
    tmp2: Vec<u32>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Acumulador en cero con el buffer primario mínimo de 4 limbs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: SignedMeta::ZERO,
            primary: vec![0u32; MINIMUM_PRIMARY_LIMBS],
            tmp1: Vec::new(),
            tmp2: Vec::new(),
        }
    }

    /**
     * Acumulador en cero con capacidad inicial para 'bit_capacity' bits.
     *
     * # Errors:
     * 'NegativeArgument' ante una capacidad negativa.
     */
    pub fn with_bit_capacity(bit_capacity: i64) -> Result<Self, BigNumError> {
        if bit_capacity < 0 {
            return Err(BigNumError::NegativeArgument("bit capacity"));
        }
        let limbs = ((bit_capacity as u64).div_ceil(32) as usize).max(MINIMUM_PRIMARY_LIMBS);
        Ok(Self {
            meta: SignedMeta::ZERO,
            primary: vec![0u32; round_to_quantum(limbs)],
            tmp1: Vec::new(),
            tmp2: Vec::new(),
        })
    }

    /// Acumulador sembrado con el valor del operando.
    #[must_use]
    pub fn from_operand(value: &impl AsOperand) -> Self {
        let mut accumulator = Self::new();
        accumulator.set_value(value);
        accumulator
    }

    // --- INSPECCIÓN ---

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

    /// Signum del valor acumulado.
    #[inline]
    #[must_use]
    pub fn signum(&self) -> i32 {
        self.meta.signum()
    }

    /// Longitud en bits de la magnitud acumulada.
    #[must_use]
    pub fn bit_length(&self) -> u64 {
        bitwise::bit_length(&self.primary, self.meta.normalized_length())
    }

    /// Capacidad actual del buffer primario, en limbs.
    #[inline]
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.primary.len()
    }

    /**
     * Comparación con signo contra cualquier operando, sin asignación.
     */
    #[must_use]
    pub fn compare_to(&self, other: &impl AsOperand) -> Ordering {
        let operand = other.as_operand();
        let own_signum = self.signum();
        let operand_signum = match (operand.is_zero(), operand.is_negative()) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        };
        let sign_order = own_signum.cmp(&operand_signum);
        if sign_order != Ordering::Equal {
            return sign_order;
        }
        let length = self.meta.normalized_length();
        let magnitude_order = match operand {
            Operand::Small { magnitude, .. } => {
                compare_magnitude_with_u64(&self.primary, length, magnitude)
            }
            Operand::Big { limbs, .. } => {
                compare_magnitudes(&self.primary, length, limbs, limbs.len())
            }
        };
        if self.meta.is_negative() {
            magnitude_order.reverse()
        } else {
            magnitude_order
        }
    }

    /// Instantánea inmutable: copia profunda de los limbs vivos.
    #[must_use]
    pub fn to_big_integer(&self) -> BigInt {
        let length = self.meta.normalized_length();
        BigInt::from_normalized(self.meta.is_negative(), self.primary[..length].to_vec())
    }

    // --- GESTIÓN DE ALMACENAMIENTO ---

    /**
     * Ley de crecimiento compartida: la primera reasignación desde el
     * tamaño inicial satisface exactamente el mínimo; las subsiguientes
     * añaden min/2 de holgura. Siempre redondeado al cuanto de 4 limbs.
     */
    fn next_capacity(current: usize, minimum: usize, initial: usize) -> usize {
        if current <= initial {
            round_to_quantum(minimum)
        } else {
            round_to_quantum(minimum + minimum / 2)
        }
    }

    /// Predicado de capacidad *discard*: el contenido previo puede morir.
    fn ensure_primary_discard(&mut self, minimum: usize) {
        if self.primary.len() < minimum {
            let target = Self::next_capacity(self.primary.len(), minimum, MINIMUM_PRIMARY_LIMBS);
            trace!(from = self.primary.len(), to = target, "primary buffer growth (discard)");
            self.primary = vec![0u32; target];
        }
    }

    /// Predicado de capacidad *copy*: preserva los limbs vivos.
    fn ensure_primary_copy(&mut self, minimum: usize) {
        if self.primary.len() < minimum {
            let target = Self::next_capacity(self.primary.len(), minimum, MINIMUM_PRIMARY_LIMBS);
            trace!(from = self.primary.len(), to = target, "primary buffer growth (copy)");
            self.primary.resize(target, 0);
        }
    }

    /// Predicado *zeroed*: capacidad + limbs nulos en [longitud_viva, m).
    fn ensure_primary_zeroed(&mut self, minimum: usize) {
        self.ensure_primary_copy(minimum);
        let live = self.meta.normalized_length();
        if minimum > live {
            for limb in self.primary[live..minimum].iter_mut() {
                *limb = 0;
            }
        }
    }

    /// Análogo *discard* para tmp1 (tamaño inicial 0).
    fn ensure_tmp1(&mut self, minimum: usize) {
        if self.tmp1.len() < minimum {
            let target = Self::next_capacity(self.tmp1.len(), minimum, 0);
            trace!(from = self.tmp1.len(), to = target, "tmp1 buffer growth");
            self.tmp1 = vec![0u32; target];
        }
    }

    /// Análogo *discard* para tmp2 (tamaño inicial 0).
    fn ensure_tmp2(&mut self, minimum: usize) {
        if self.tmp2.len() < minimum {
            let target = Self::next_capacity(self.tmp2.len(), minimum, 0);
            trace!(from = self.tmp2.len(), to = target, "tmp2 buffer growth");
            self.tmp2 = vec![0u32; target];
        }
    }

    /**
     * Protocolo de intercambio: adopta tmp1 como nuevo buffer primario
     * mediante swap de punteros. El valor previo permanece intacto en el
     * nuevo tmp1; los pasos de seguimiento que lo necesiten deben leerlo
     * antes de volver a usar tmp1 como scratch.
     */
    fn adopt_tmp1_as_primary(&mut self, is_negative: bool, length: usize) {
        std::mem::swap(&mut self.primary, &mut self.tmp1);
        self.meta = SignedMeta::new(is_negative, length);
    }

    // --- ASIGNACIÓN DE VALOR ---

    /// Reemplaza el valor acumulado por el del operando.
    pub fn set_value(&mut self, value: &impl AsOperand) {
        match value.as_operand() {
            Operand::Small {
                negative,
                magnitude,
            } => self.set_scalar(negative, magnitude),
            Operand::Big { negative, limbs } => {
                self.ensure_primary_discard(limbs.len());
                self.primary[..limbs.len()].copy_from_slice(limbs);
                self.meta = SignedMeta::new(negative, limbs.len());
            }
        }
    }

    /// Colapsa el acumulador al cero canónico sin liberar buffers.
    pub fn set_zero(&mut self) {
        self.meta = SignedMeta::ZERO;
    }

    fn set_scalar(&mut self, negative: bool, magnitude: u64) {
        let low = magnitude as u32;
        let high = (magnitude >> 32) as u32;
        self.primary[0] = low;
        self.primary[1] = high;
        let length = if high != 0 {
            2
        } else if low != 0 {
            1
        } else {
            0
        };
        self.meta = SignedMeta::new(negative, length);
    }

    // --- SUMA Y RESTA CON DESPACHO DE SIGNO ---

    /// Suma en sitio: self += operando.
    pub fn add_assign_operand(&mut self, value: &impl AsOperand) {
        match value.as_operand() {
            Operand::Small {
                negative,
                magnitude,
            } => self.add_signed_scalar(negative, magnitude),
            Operand::Big { negative, limbs } => self.add_signed_slices(negative, limbs),
        }
    }

    /// Resta en sitio: self -= operando.
    pub fn sub_assign_operand(&mut self, value: &impl AsOperand) {
        match value.as_operand() {
            Operand::Small {
                negative,
                magnitude,
            } => self.add_signed_scalar(!negative && magnitude != 0, magnitude),
            Operand::Big { negative, limbs } => {
                self.add_signed_slices(!negative && !limbs.is_empty(), limbs)
            }
        }
    }

    /// Suma del valor absoluto: self += |operando|.
    pub fn add_abs_value_of(&mut self, value: &impl AsOperand) {
        match value.as_operand() {
            Operand::Small { magnitude, .. } => self.add_signed_scalar(false, magnitude),
            Operand::Big { limbs, .. } => self.add_signed_slices(false, limbs),
        }
    }

    /// Forma con destino explícito: self = a + b.
    pub fn set_add(&mut self, a: &impl AsOperand, b: &impl AsOperand) {
        self.set_value(a);
        self.add_assign_operand(b);
    }

    /// Forma con destino explícito: self = a - b.
    pub fn set_sub(&mut self, a: &impl AsOperand, b: &impl AsOperand) {
        self.set_value(a);
        self.sub_assign_operand(b);
    }

    /// Duplica el valor en sitio: la forma legal de self += self.
    pub fn double_in_place(&mut self) {
        let length = self.meta.normalized_length();
        self.ensure_primary_copy(length + 1);
        let new_length = shift_left_in_place(&mut self.primary, length, 1);
        self.meta = self.meta.with_length(new_length);
    }

    /**
     * Despacho con signo de la variante escalar: polaridades iguales
     * suman magnitudes (kernel de literal de 2 limbs); opuestas comparan
     * y restan la menor de la mayor.
     */
    fn add_signed_scalar(&mut self, operand_negative: bool, magnitude: u64) {
        if magnitude == 0 {
            return;
        }
        let length = self.meta.normalized_length();
        if self.meta.is_negative() == operand_negative {
            self.ensure_primary_copy(length.max(2) + 1);
            let new_length = add_assign_u64(&mut self.primary, length, magnitude);
            self.meta = SignedMeta::new(operand_negative, new_length);
            return;
        }
        match compare_magnitude_with_u64(&self.primary, length, magnitude) {
            Ordering::Equal => self.meta = SignedMeta::ZERO,
            Ordering::Greater => {
                let new_length = sub_assign_u64(&mut self.primary, length, magnitude);
                self.meta = self.meta.with_length(new_length);
            }
            Ordering::Less => {
                // |acc| < escalar: ambos caben en 64 bits; resta numérica.
                let own = bitwise::extract_u64_at_bit_index(&self.primary, length, 0);
                self.set_scalar(operand_negative, magnitude - own);
            }
        }
    }

    /// Despacho con signo sobre una magnitud de limbs prestada.
    fn add_signed_slices(&mut self, operand_negative: bool, operand: &[u32]) {
        if operand.is_empty() {
            return;
        }
        let length = self.meta.normalized_length();
        if self.meta.is_negative() == operand_negative {
            self.ensure_primary_copy(length.max(operand.len()) + 1);
            let new_length = add_assign_slices(&mut self.primary, length, operand, operand.len());
            self.meta = SignedMeta::new(operand_negative, new_length);
            return;
        }
        match compare_magnitudes(&self.primary, length, operand, operand.len()) {
            Ordering::Equal => self.meta = SignedMeta::ZERO,
            Ordering::Greater => {
                let new_length =
                    sub_assign_slices(&mut self.primary, length, operand, operand.len());
                self.meta = self.meta.with_length(new_length);
            }
            Ordering::Less => {
                self.ensure_primary_copy(operand.len());
                let new_length =
                    rsub_assign_slices(&mut self.primary, length, operand, operand.len());
                self.meta = SignedMeta::new(operand_negative, new_length);
            }
        }
    }

    // --- MULTIPLICACIÓN Y CUADRADO ---

    /// Producto en sitio: self *= operando.
    pub fn mul_assign_operand(&mut self, value: &impl AsOperand) {
        let length = self.meta.normalized_length();
        let operand = value.as_operand();
        if length == 0 || operand.is_zero() {
            self.set_zero();
            return;
        }
        let result_negative = self.meta.is_negative() ^ operand.is_negative();
        match operand {
            Operand::Small { magnitude, .. } if magnitude <= u32::MAX as u64 => {
                // Carril rápido de limb único: legal en sitio.
                self.ensure_primary_copy(length + 1);
                let new_length = mul_u32_in_place(&mut self.primary, length, magnitude as u32);
                self.meta = SignedMeta::new(result_negative, new_length);
            }
            Operand::Small { magnitude, .. } => {
                // Multiplicador de 2 limbs: contrato sin aliasing, vía tmp1.
                self.ensure_tmp1(length + 2);
                let new_length =
                    mul_by_u64_into(&mut self.tmp1, &self.primary, length, magnitude);
                self.adopt_tmp1_as_primary(result_negative, new_length);
            }
            Operand::Big { limbs, .. } => {
                self.ensure_tmp1(length + limbs.len());
                let new_length =
                    mul_into(&mut self.tmp1, &self.primary, length, limbs, limbs.len());
                self.adopt_tmp1_as_primary(result_negative, new_length);
            }
        }
    }

    /// Forma con destino explícito: self = a · b.
    pub fn set_mul(&mut self, a: &impl AsOperand, b: &impl AsOperand) {
        self.set_value(a);
        self.mul_assign_operand(b);
    }

    /// Cuadrado en sitio: la forma legal de self *= self.
    pub fn square_in_place(&mut self) {
        let length = self.meta.normalized_length();
        if length == 0 {
            return;
        }
        self.ensure_tmp1(2 * length);
        self.ensure_tmp2(karatsuba::square_scratch_length(length));
        for limb in self.tmp1[..2 * length].iter_mut() {
            *limb = 0;
        }
        let new_length = karatsuba::square_into(
            &mut self.tmp1[..2 * length],
            &self.primary[..length],
            &mut self.tmp2,
        );
        self.adopt_tmp1_as_primary(false, new_length);
    }

    /**
     * Acumulación de cuadrado: self += v². El cuadrado se materializa en
     * tmp1 y recién entonces se suma, de modo que 'v' puede compartir
     * magnitud con este acumulador sin riesgo.
     */
    pub fn add_square_of(&mut self, value: &impl AsOperand) {
        with_operand_magnitude(value.as_operand(), |_, limbs| {
            let operand_copy_len = limbs.len();
            if operand_copy_len == 0 {
                return;
            }
            // El cuadrado entra completo en tmp1 antes de sumarse.
            self.ensure_tmp1(2 * operand_copy_len);
            self.ensure_tmp2(karatsuba::square_scratch_length(operand_copy_len));
            for limb in self.tmp1[..2 * operand_copy_len].iter_mut() {
                *limb = 0;
            }
            let square_length = karatsuba::square_into(
                &mut self.tmp1[..2 * operand_copy_len],
                limbs,
                &mut self.tmp2,
            );
            let length = self.meta.normalized_length();
            self.ensure_primary_copy(length.max(square_length) + 1);
            let square_negative = false;
            if self.meta.is_negative() == square_negative {
                let new_length = add_assign_slices(
                    &mut self.primary,
                    length,
                    &self.tmp1[..square_length],
                    square_length,
                );
                self.meta = SignedMeta::new(square_negative, new_length);
            } else {
                // Acumulador negativo: |self| contra v² decide el signo.
                match compare_magnitudes(
                    &self.primary,
                    length,
                    &self.tmp1[..square_length],
                    square_length,
                ) {
                    Ordering::Equal => self.meta = SignedMeta::ZERO,
                    Ordering::Greater => {
                        let new_length = sub_assign_slices(
                            &mut self.primary,
                            length,
                            &self.tmp1[..square_length],
                            square_length,
                        );
                        self.meta = self.meta.with_length(new_length);
                    }
                    Ordering::Less => {
                        let new_length = rsub_assign_slices(
                            &mut self.primary,
                            length,
                            &self.tmp1[..square_length],
                            square_length,
                        );
                        self.meta = SignedMeta::new(false, new_length);
                    }
                }
            }
        });
    }

    /// Acumulación del cuadrado propio: self += self².
    pub fn add_square_of_self(&mut self) {
        let length = self.meta.normalized_length();
        if length == 0 {
            return;
        }
        self.ensure_tmp1(2 * length);
        self.ensure_tmp2(karatsuba::square_scratch_length(length));
        for limb in self.tmp1[..2 * length].iter_mut() {
            *limb = 0;
        }
        let square_length = karatsuba::square_into(
            &mut self.tmp1[..2 * length],
            &self.primary[..length],
            &mut self.tmp2,
        );
        let negative = self.meta.is_negative();
        self.ensure_primary_copy(square_length + 1);
        if !negative {
            let new_length = add_assign_slices(
                &mut self.primary,
                length,
                &self.tmp1[..square_length],
                square_length,
            );
            self.meta = SignedMeta::new(false, new_length);
        } else {
            // self < 0 y self² >= |self|: el resultado es self² - |self|.
            let new_length = rsub_assign_slices(
                &mut self.primary,
                length,
                &self.tmp1[..square_length],
                square_length,
            );
            self.meta = SignedMeta::new(false, new_length);
        }
    }

    // --- DIVISIÓN, RESTO Y MÓDULO ---

    /// Cociente en sitio: self /= operando (truncado hacia cero).
    pub fn div_assign_operand(&mut self, value: &impl AsOperand) -> Result<(), BigNumError> {
        self.div_rem_assign(value, DivisionKeep::Quotient)
    }

    /// Resto en sitio: self %= operando (signo del dividendo).
    pub fn rem_assign_operand(&mut self, value: &impl AsOperand) -> Result<(), BigNumError> {
        self.div_rem_assign(value, DivisionKeep::Remainder)
    }

    /**
     * Módulo acotado en sitio: 0 <= self < operando.
     *
     * # Errors:
     * 'DivisionByZero' y 'NegativeModulus' según el contrato del módulo.
     */
    pub fn modulus_assign_operand(&mut self, value: &impl AsOperand) -> Result<(), BigNumError> {
        let operand = value.as_operand();
        if operand.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        if operand.is_negative() {
            return Err(BigNumError::NegativeModulus);
        }
        self.rem_assign_operand(value)?;
        if self.meta.is_negative() {
            // Resto truncado negativo: una reposición del divisor lo acota.
            self.add_assign_operand(value);
        }
        Ok(())
    }

    fn div_rem_assign(
        &mut self,
        value: &impl AsOperand,
        keep: DivisionKeep,
    ) -> Result<(), BigNumError> {
        let operand = value.as_operand();
        if operand.is_zero() {
            return Err(BigNumError::DivisionByZero);
        }
        let dividend_negative = self.meta.is_negative();
        let quotient_negative = dividend_negative ^ operand.is_negative();
        let length = self.meta.normalized_length();

        with_operand_magnitude(operand, |_, divisor| {
            match try_div_fast_path(&self.primary[..length], length, divisor, divisor.len()) {
                Some(FastDivOutcome::QuotientZero) => {
                    trace!(length, "accumulator division fast path: quotient zero");
                    match keep {
                        DivisionKeep::Quotient => self.meta = SignedMeta::ZERO,
                        DivisionKeep::Remainder => {}
                    }
                    return;
                }
                Some(FastDivOutcome::QuotientOne) => {
                    trace!(length, "accumulator division fast path: quotient one");
                    match keep {
                        DivisionKeep::Quotient => self.set_scalar(quotient_negative, 1),
                        DivisionKeep::Remainder => {
                            let new_length = sub_assign_slices(
                                &mut self.primary,
                                length,
                                divisor,
                                divisor.len(),
                            );
                            self.meta = SignedMeta::new(dividend_negative, new_length);
                        }
                    }
                    return;
                }
                None => {}
            }

            if divisor.len() <= 2 {
                let scalar_divisor = bitwise::extract_u64_at_bit_index(divisor, divisor.len(), 0);
                let (quotient_length, remainder) =
                    div_rem_by_u64_in_place(&mut self.primary, length, scalar_divisor);
                match keep {
                    DivisionKeep::Quotient => {
                        self.meta = SignedMeta::new(quotient_negative, quotient_length);
                    }
                    DivisionKeep::Remainder => self.set_scalar(dividend_negative, remainder),
                }
                return;
            }

            // Algoritmo D pleno: dividendo normalizado en tmp1, divisor
            // normalizado en tmp2, cociente sobre el propio primario.
            self.ensure_tmp1(length + 1);
            self.ensure_tmp2(divisor.len() + 1);
            self.tmp1[..length].copy_from_slice(&self.primary[..length]);
            let (quotient_length, remainder_length) = div_rem_knuth(
                &mut self.primary,
                &mut self.tmp1,
                &mut self.tmp2,
                length,
                divisor,
                divisor.len(),
            );
            match keep {
                DivisionKeep::Quotient => {
                    self.meta = SignedMeta::new(quotient_negative, quotient_length);
                }
                DivisionKeep::Remainder => {
                    self.primary[..remainder_length].copy_from_slice(&self.tmp1[..remainder_length]);
                    self.meta = SignedMeta::new(dividend_negative, remainder_length);
                }
            }
        });
        Ok(())
    }

    /// Forma con destino explícito: self = a / b.
    pub fn set_div(&mut self, a: &impl AsOperand, b: &impl AsOperand) -> Result<(), BigNumError> {
        self.set_value(a);
        self.div_assign_operand(b)
    }

    /// Forma con destino explícito: self = a % b.
    pub fn set_rem(&mut self, a: &impl AsOperand, b: &impl AsOperand) -> Result<(), BigNumError> {
        self.set_value(a);
        self.rem_assign_operand(b)
    }

    // --- SIGNO Y DESPLAZAMIENTOS ---

    /// Negación en sitio; negar el cero es nulo.
    pub fn negate_in_place(&mut self) {
        self.meta = self.meta.negated();
    }

    /// Valor absoluto en sitio.
    pub fn abs_in_place(&mut self) {
        self.meta = self.meta.abs();
    }

    /**
     * Desplazamiento a la izquierda en sitio.
     *
     * # Errors:
     * 'NegativeArgument' ante un conteo negativo.
     */
    pub fn shl_assign_bits(&mut self, bit_count: i64) -> Result<(), BigNumError> {
        if bit_count < 0 {
            return Err(BigNumError::NegativeArgument("shift bit count"));
        }
        let count = bit_count as usize;
        let length = self.meta.normalized_length();
        if length == 0 || count == 0 {
            return Ok(());
        }
        self.ensure_primary_copy(length + count / 32 + 1);
        let new_length = shift_left_in_place(&mut self.primary, length, count);
        self.meta = self.meta.with_length(new_length);
        Ok(())
    }

    /**
     * Desplazamiento aritmético a la derecha en sitio (complemento a dos
     * sobre la representación signo-magnitud).
     *
     * # Errors:
     * 'NegativeArgument' ante un conteo negativo.
     */
    pub fn shr_assign_bits(&mut self, bit_count: i64) -> Result<(), BigNumError> {
        if bit_count < 0 {
            return Err(BigNumError::NegativeArgument("shift bit count"));
        }
        let count = bit_count as usize;
        let length = self.meta.normalized_length();
        if length == 0 || count == 0 {
            return Ok(());
        }
        let dropped_one = self.meta.is_negative()
            && test_any_bit_in_lower_n(&self.primary, length, count as u64);
        let mut new_length = shift_right_in_place(&mut self.primary, length, count);
        if dropped_one {
            self.ensure_primary_copy(new_length + 1);
            new_length = add_assign_u64(&mut self.primary, new_length, 1);
        }
        self.meta = self.meta.with_length(new_length);
        Ok(())
    }

    // --- SUPERFICIE DE BITS ---

    /**
     * Interroga un bit de la magnitud acumulada.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn test_bit(&self, bit_index: i64) -> Result<bool, BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        Ok(bitwise::test_bit(
            &self.primary,
            self.meta.normalized_length(),
            bit_index as u64,
        ))
    }

    /**
     * Escritura dispersa: enciende un bit, extendiendo la magnitud sobre
     * capacidad pre-anulada cuando el índice excede la longitud viva.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn set_bit_in_place(&mut self, bit_index: i64) -> Result<(), BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        let required = (bit_index as u64 / 32) as usize + 1;
        self.ensure_primary_zeroed(required);
        bitwise::set_bit_in(&mut self.primary, bit_index as u64);
        if required > self.meta.normalized_length() {
            self.meta = self.meta.with_length(required);
        }
        Ok(())
    }

    /**
     * Apaga un bit si cae dentro de la magnitud viva y renormaliza.
     *
     * # Errors:
     * 'NegativeArgument' ante un índice negativo.
     */
    pub fn clear_bit_in_place(&mut self, bit_index: i64) -> Result<(), BigNumError> {
        if bit_index < 0 {
            return Err(BigNumError::NegativeArgument("bit index"));
        }
        let length = self.meta.normalized_length();
        bitwise::clear_bit_in(&mut self.primary, length, bit_index as u64);
        self.meta = self
            .meta
            .with_length(normalized_length(&self.primary, length));
        Ok(())
    }

    // --- MÁSCARA DE BITS ---

    /**
     * Conserva únicamente los bits de la ventana [index, index + width) y
     * fuerza el signo a no-negativo.
     *
     * # Errors:
     * 'NegativeArgument' ante anchura o índice negativos.
     */
    pub fn apply_bit_mask(&mut self, width: i64, index: i64) -> Result<(), BigNumError> {
        if width < 0 {
            return Err(BigNumError::NegativeArgument("mask width"));
        }
        if index < 0 {
            return Err(BigNumError::NegativeArgument("mask index"));
        }
        let width = width as u64;
        let index = index as u64;
        let length = self.meta.normalized_length();

        if width == 0 {
            self.set_zero();
            return Ok(());
        }
        if width == 1 {
            // Test-and-set de un único limb.
            let survives = bitwise::test_bit(&self.primary, length, index);
            if survives {
                let limb_index = (index / 32) as usize;
                let bit = 1u32 << (index % 32);
                for limb in self.primary[..limb_index].iter_mut() {
                    *limb = 0;
                }
                self.primary[limb_index] = bit;
                self.meta = SignedMeta::new(false, limb_index + 1);
            } else {
                self.set_zero();
            }
            return Ok(());
        }

        let end_bit = index + width;
        let mut new_length = length.min(end_bit.div_ceil(32) as usize);

        // Enmascara el limb activo superior si la ventana lo corta.
        let top_partial = (end_bit % 32) as u32;
        if top_partial != 0 && new_length == (end_bit / 32) as usize + 1 {
            self.primary[new_length - 1] &= (1u32 << top_partial) - 1;
        }

        // Anula los limbs bajos completos y el parcial inferior.
        let low_full = ((index / 32) as usize).min(new_length);
        for limb in self.primary[..low_full].iter_mut() {
            *limb = 0;
        }
        let low_partial = (index % 32) as u32;
        if low_partial != 0 && low_full < new_length {
            self.primary[low_full] &= !((1u32 << low_partial) - 1);
        }

        new_length = normalized_length(&self.primary, new_length);
        self.meta = SignedMeta::new(false, new_length);
        Ok(())
    }
}

/// Qué mitad del par (cociente, resto) retiene el acumulador.
#[derive(Clone, Copy)]
enum DivisionKeep {
    Quotient,
    Remainder,
}

// --- IGUALDAD CONTRA TIPOS CONCRETOS (sin Hash, por contrato) ---

impl PartialEq<BigInt> for Accumulator {
    fn eq(&self, other: &BigInt) -> bool {
        let length = self.meta.normalized_length();
        self.meta.is_negative() == other.is_negative()
            && self.primary[..length] == *other.magnitude_limbs()
    }
}

impl PartialEq<i64> for Accumulator {
    fn eq(&self, other: &i64) -> bool {
        let length = self.meta.normalized_length();
        self.meta.is_negative() == (*other < 0)
            && compare_magnitude_with_u64(&self.primary, length, other.unsigned_abs())
                == Ordering::Equal
    }
}

impl PartialEq<i32> for Accumulator {
    fn eq(&self, other: &i32) -> bool {
        *self == *other as i64
    }
}

impl PartialEq<u64> for Accumulator {
    fn eq(&self, other: &u64) -> bool {
        let length = self.meta.normalized_length();
        !self.meta.is_negative()
            && compare_magnitude_with_u64(&self.primary, length, *other) == Ordering::Equal
    }
}

impl PartialEq<u32> for Accumulator {
    fn eq(&self, other: &u32) -> bool {
        *self == *other as u64
    }
}

// --- AZÚCAR DE ASIGNACIÓN COMPUESTA ---

macro_rules! forward_compound_assign {
    ($trait_name:ident, $method:ident, $delegate:ident, $($operand_type:ty),+) => {
        $(
            impl $trait_name<$operand_type> for Accumulator {
                fn $method(&mut self, rhs: $operand_type) {
                    self.$delegate(&rhs);
                }
            }

            impl $trait_name<&$operand_type> for Accumulator {
                fn $method(&mut self, rhs: &$operand_type) {
                    self.$delegate(rhs);
                }
            }
        )+
    };
}

forward_compound_assign!(AddAssign, add_assign, add_assign_operand, i32, u32, i64, u64);
forward_compound_assign!(SubAssign, sub_assign, sub_assign_operand, i32, u32, i64, u64);
forward_compound_assign!(MulAssign, mul_assign, mul_assign_operand, i32, u32, i64, u64);

impl AddAssign<&BigInt> for Accumulator {
    fn add_assign(&mut self, rhs: &BigInt) {
        self.add_assign_operand(rhs);
    }
}

impl SubAssign<&BigInt> for Accumulator {
    fn sub_assign(&mut self, rhs: &BigInt) {
        self.sub_assign_operand(rhs);
    }
}

impl MulAssign<&BigInt> for Accumulator {
    fn mul_assign(&mut self, rhs: &BigInt) {
        self.mul_assign_operand(rhs);
    }
}
