// [tests/mirror/libs/core/bignum_engine/division_laws.test.rs]
/*!
 * =================================================================
 * APARATO: CERTIFICADOR DE DIVISIÓN (V5.0 - KNUTH D SOVEREIGN)
 * CLASIFICACIÓN: TRINITY EVIDENCE // ESTRATO L1-CORE-MIRROR
 * RESPONSABILIDAD: LEYES DE COCIENTE, RESTO, MÓDULO Y ATAJOS TIPADOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DIVISION LAW: a == (a/b)·b + (a%b), signo(a%b) ∈ {0, signo(a)} y
 *    |a%b| < |b| para todo divisor no nulo.
 * 2. MODULUS LAW: 0 <= a mod b < b para todo divisor positivo.
 * 3. RECONSTRUCTION PROOF: x = y·q + r con q y r sembrados exige que la
 *    división devuelva exactamente (q, r): cubre el add-back de Knuth
 *    sin depender de su probabilidad 2/B.
 * =================================================================
 */

use std::time::{Duration, Instant};

use magno_core_bignum::prelude::*;
use num_bigint::{BigUint, Sign};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use serde_json::json;

fn to_oracle(value: &BigInt) -> num_bigint::BigInt {
    let magnitude = BigUint::new(value.to_u32_limb_array());
    let sign = match value.signum() {
        0 => Sign::NoSign,
        s if s < 0 => Sign::Minus,
        _ => Sign::Plus,
    };
    num_bigint::BigInt::from_biguint(sign, magnitude)
}

fn random_value(rng: &mut StdRng, limbs: usize, negative: bool) -> BigInt {
    let magnitude: Vec<u32> = (0..limbs).map(|_| rng.gen()).collect();
    BigInt::from_sign_magnitude(negative, magnitude)
}

/// Despacho silencioso del veredicto al Centro de Mando.
fn dispatch_division_report(verdict: &str, forensic_log: String, error_count: u32) {
    let orchestrator_url =
        std::env::var("ORCHESTRATOR_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let auth_token = std::env::var("WORKER_AUTH_TOKEN").unwrap_or_else(|_| "observer".into());

    let payload = json!({
        "testName": "DIVISION_LAWS",
        "stratum": "L1_BIGNUM",
        "verdict": verdict,
        "metrics": { "throughput": 0.0, "latency_ms": 0, "error_rate": error_count as f64 },
        "forensicLog": forensic_log,
        "environment": "Local_Division_Sanctum",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("INFRA_FAULT: Reporting engine failed.");
    let _ = client
        .post(format!("{}/api/v1/admin/qa/report", orchestrator_url))
        .header("Authorization", format!("Bearer {}", auth_token))
        .json(&payload)
        .send();
}

#[cfg(test)]
mod tests {
    use super::*;

    /**
     * CERTIFICACIÓN: ley de división y ley de módulo sobre anchos mixtos.
     */
    #[test]
    fn certify_division_and_modulus_laws() {
        println!("\n➗ [INICIO]: Leyes de división y módulo V5.0...");
        let start_time = Instant::now();
        let mut forensic_bitacora = String::new();
        let mut integrity_faults = 0u32;
        let mut rng = StdRng::seed_from_u64(0x4D41_474E_4F10);

        println!("   🧪 Fase 1: Ley de división sobre 400 pares sembrados...");
        for round in 0..400 {
            let dividend_limbs = 1 + (round % 14) as usize;
            let divisor_limbs = 1 + (round % 9) as usize;
            let dividend = random_value(&mut rng, dividend_limbs, round % 2 == 0);
            let divisor = random_value(&mut rng, divisor_limbs, round % 3 == 0);
            if divisor.is_zero() {
                continue;
            }

            let (quotient, remainder) = dividend.div_rem(&divisor).expect("divisor no nulo");

            // a == (a/b)·b + (a%b)
            if &(&quotient * &divisor) + &remainder != dividend {
                integrity_faults += 1;
                forensic_bitacora
                    .push_str(&format!("❌ LAW: reconstrucción fallida en ronda {}\n", round));
                continue;
            }
            // signo(a%b) ∈ {0, signo(a)}
            if remainder.signum() != 0 && remainder.signum() != dividend.signum() {
                integrity_faults += 1;
                forensic_bitacora.push_str(&format!("❌ LAW: signo del resto en ronda {}\n", round));
            }
            // |a%b| < |b|
            if remainder.abs() >= divisor.abs() {
                integrity_faults += 1;
                forensic_bitacora
                    .push_str(&format!("❌ LAW: resto fuera de rango en ronda {}\n", round));
            }
            // Paridad contra el oráculo (división truncada de num-bigint).
            let oracle_quotient = to_oracle(&dividend) / to_oracle(&divisor);
            if to_oracle(&quotient) != oracle_quotient {
                integrity_faults += 1;
                forensic_bitacora
                    .push_str(&format!("❌ ORACLE: cociente divergente en ronda {}\n", round));
            }
        }
        if integrity_faults == 0 {
            forensic_bitacora.push_str("✅ LAW: 400 pares certificados contra el oráculo.\n");
        }

        println!("   🧪 Fase 2: Reconstrucción x = y·q + r (cobertura del add-back)...");
        for round in 0..200 {
            let divisor = random_value(&mut rng, 3 + (round % 6) as usize, false);
            let quotient_seed = random_value(&mut rng, 1 + (round % 5) as usize, false);
            if divisor.is_zero() || quotient_seed.is_zero() {
                continue;
            }
            // r < y garantizado por módulo.
            let remainder_seed = random_value(&mut rng, divisor.magnitude_limbs().len(), false)
                .modulus(&divisor)
                .expect("divisor positivo");
            let dividend = &(&quotient_seed * &divisor) + &remainder_seed;

            let (quotient, remainder) = dividend.div_rem(&divisor).expect("divisor no nulo");
            if quotient != quotient_seed || remainder != remainder_seed {
                integrity_faults += 1;
                forensic_bitacora.push_str(&format!(
                    "❌ RECON: (q, r) sembrado no recuperado en ronda {}\n",
                    round
                ));
            }
        }

        println!("   🧪 Fase 3: Ley de módulo acotado y escenario (-7, 3)...");
        let minus_seven = BigInt::from(-7i64);
        let three = BigInt::from(3i64);
        if minus_seven.modulus(&three) == Ok(BigInt::from(2i64))
            && minus_seven.div_rem(&three).map(|pair| pair.1) == Ok(BigInt::from(-1i64))
            && minus_seven.div_rem(&three).map(|pair| pair.0) == Ok(BigInt::from(-2i64))
        {
            forensic_bitacora.push_str("✅ MOD: (-7) mod 3 = 2 y (-7) rem 3 = -1.\n");
        } else {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ MOD: Escenario (-7, 3) violado.\n");
        }
        for round in 0..150 {
            let value = random_value(&mut rng, 1 + (round % 10) as usize, round % 2 == 0);
            let modulus = random_value(&mut rng, 1 + (round % 5) as usize, false);
            if modulus.is_zero() {
                continue;
            }
            let reduced = value.modulus(&modulus).expect("módulo positivo");
            if reduced.is_negative() || reduced >= modulus {
                integrity_faults += 1;
                forensic_bitacora
                    .push_str(&format!("❌ MOD: 0 <= r < b violado en ronda {}\n", round));
            }
        }

        println!("   🧪 Fase 4: Atajos tipados y catálogo de fallos...");
        let small = BigInt::from(123u64);
        let large = BigInt::from_hex_str("0xFFFF_FFFF_FFFF_FFFF_FFFF").expect("hex");
        let (q_zero, r_identity) = small.div_rem(&large).expect("divisor no nulo");
        if !q_zero.is_zero() || r_identity != small {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAST: |x| < |y| debe dar cociente 0, resto x.\n");
        }
        let (q_one, r_zero) = large.div_rem(&large).expect("divisor no nulo");
        if q_one != BigInt::one() || !r_zero.is_zero() {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAST: x / x debe dar cociente 1, resto 0.\n");
        }
        let twin_top = BigInt::from_hex_str("0xFFFF_0000_0000_0001").expect("hex");
        let twin_low = BigInt::from_hex_str("0xFFFF_0000_0000_0000").expect("hex");
        let (q_twin, r_twin) = twin_top.div_rem(&twin_low).expect("divisor no nulo");
        if q_twin != BigInt::one() || r_twin != BigInt::one() {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAST: compare-and-subtract de misma longitud.\n");
        }

        if BigInt::one().div_rem(&BigInt::zero()) != Err(BigNumError::DivisionByZero) {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAULT: división por cero sin señalizar.\n");
        }
        if BigInt::one().modulus(&BigInt::from(-3i64)) != Err(BigNumError::NegativeModulus) {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAULT: módulo negativo sin señalizar.\n");
        }
        if BigInt::one().modulus(&BigInt::zero()) != Err(BigNumError::DivisionByZero) {
            integrity_faults += 1;
            forensic_bitacora.push_str("❌ FAULT: módulo por cero sin señalizar.\n");
        }

        println!("   🧪 Fase 5: Carril de divisor de 2 limbs (aritmética de 128 bits)...");
        for round in 0..120 {
            let dividend = random_value(&mut rng, 5 + (round % 6) as usize, false);
            let divisor_scalar = rng.gen::<u64>() | (1u64 << 63);
            let divisor = BigInt::from(divisor_scalar);
            let (quotient, remainder) = dividend.div_rem(&divisor).expect("divisor no nulo");
            let oracle_quotient = to_oracle(&dividend) / divisor_scalar;
            let oracle_remainder = to_oracle(&dividend) % divisor_scalar;
            if to_oracle(&quotient) != oracle_quotient || to_oracle(&remainder) != oracle_remainder
            {
                integrity_faults += 1;
                forensic_bitacora
                    .push_str(&format!("❌ U64: carril de 2 limbs divergente en {}\n", round));
            }
        }

        let verdict = if integrity_faults == 0 { "GOLD_MASTER" } else { "FAILED" };
        forensic_bitacora.push_str(&format!("\nVERDICTO_FINAL: {}\n", verdict));
        dispatch_division_report(verdict, forensic_bitacora, integrity_faults);

        println!(
            "\n🏁 [INFORME]: Auditoría finalizada en {:?}. Veredicto: {}",
            start_time.elapsed(),
            verdict
        );
        assert_eq!(integrity_faults, 0, "Leyes de división comprometidas.");
    }

    /**
     * CERTIFICACIÓN: las formas en sitio del acumulador igualan a la vía
     * inmutable.
     */
    #[test]
    fn certify_accumulator_division_parity() {
        let mut rng = StdRng::seed_from_u64(0x4D41_474E_4F11);
        for round in 0..150 {
            let dividend = random_value(&mut rng, 1 + (round % 12) as usize, round % 2 == 1);
            let divisor = random_value(&mut rng, 1 + (round % 7) as usize, round % 5 == 0);
            if divisor.is_zero() {
                continue;
            }
            let (expected_quotient, expected_remainder) =
                dividend.div_rem(&divisor).expect("divisor no nulo");

            let mut quotient_lane = Accumulator::from_operand(&dividend);
            quotient_lane
                .div_assign_operand(&divisor)
                .expect("divisor no nulo");
            assert!(
                quotient_lane == expected_quotient,
                "cociente en sitio divergente en ronda {}",
                round
            );

            let mut remainder_lane = Accumulator::from_operand(&dividend);
            remainder_lane
                .rem_assign_operand(&divisor)
                .expect("divisor no nulo");
            assert!(
                remainder_lane == expected_remainder,
                "resto en sitio divergente en ronda {}",
                round
            );
        }

        let mut faulted = Accumulator::from_operand(&BigInt::one());
        assert_eq!(
            faulted.div_assign_operand(&BigInt::zero()),
            Err(BigNumError::DivisionByZero)
        );
        assert_eq!(
            faulted.modulus_assign_operand(&-5i64),
            Err(BigNumError::NegativeModulus)
        );
    }
}
