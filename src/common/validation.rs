use rust_decimal::Decimal;
use validator::ValidationError;

use crate::common::error::AppError;

// Saldos e valores são NUMERIC(14, 2)
pub const CASAS_DECIMAIS_MOEDAS: u32 = 2;

pub fn valor_maximo_moedas() -> Decimal {
    Decimal::new(99_999_999_999_999, CASAS_DECIMAIS_MOEDAS)
}

/// Motivo da recusa de uma quantidade de moedas, ou `None` se ela cabe no schema.
pub fn problema_quantidade(val: &Decimal) -> Option<&'static str> {
    if *val <= Decimal::ZERO {
        Some("Quantidade deve ser maior que zero")
    } else if val.normalize().scale() > CASAS_DECIMAIS_MOEDAS {
        Some("Quantidade deve ter no máximo 2 casas decimais")
    } else if *val > valor_maximo_moedas() {
        Some("Quantidade excede o valor máximo permitido")
    } else {
        None
    }
}

pub fn checar_quantidade(val: &Decimal) -> Result<(), AppError> {
    match problema_quantidade(val) {
        Some(motivo) => Err(AppError::Validacao(motivo.into())),
        None => Ok(()),
    }
}

/// Saldo depois do crédito, recusado se não couber em NUMERIC(14, 2).
pub fn creditar(saldo: Decimal, quantidade: Decimal) -> Result<Decimal, AppError> {
    saldo
        .checked_add(quantidade)
        .filter(|novo| *novo <= valor_maximo_moedas())
        .ok_or_else(|| AppError::Validacao("Saldo resultante excede o valor máximo permitido".into()))
}

pub fn debitar(saldo: Decimal, quantidade: Decimal) -> Result<Decimal, AppError> {
    saldo
        .checked_sub(quantidade)
        .ok_or_else(|| AppError::Validacao("Quantidade inválida".into()))
}

// ---
// Validações customizadas usadas pelos payloads
// ---

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if let Some(motivo) = problema_quantidade(val) {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.add_param("scale".into(), &CASAS_DECIMAIS_MOEDAS);
        err.message = Some(motivo.into());
        return Err(err);
    }
    Ok(())
}

// @NotBlank: `length(min = 1)` aceitaria "   "
pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("O campo não pode estar em branco.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positivo_rejeita_zero_e_negativo() {
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::from(-3)).is_err());
        assert!(validate_positive(&Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn positivo_rejeita_mais_de_duas_casas_e_valor_acima_do_maximo() {
        assert!(validate_positive(&Decimal::new(5, 3)).is_err());
        assert!(validate_positive(&Decimal::new(1, 3)).is_err());
        assert!(validate_positive(&(valor_maximo_moedas() + Decimal::new(1, 2))).is_err());
        assert!(validate_positive(&valor_maximo_moedas()).is_ok());
        // zeros à direita não contam como casas
        assert!(validate_positive(&Decimal::new(1500, 3)).is_ok());
    }

    #[test]
    fn credito_que_estoura_o_saldo_e_recusado() {
        assert!(matches!(
            creditar(valor_maximo_moedas(), Decimal::new(1, 2)),
            Err(AppError::Validacao(_))
        ));
        assert!(matches!(creditar(Decimal::MAX, Decimal::MAX), Err(AppError::Validacao(_))));
        assert_eq!(creditar(Decimal::from(5), Decimal::from(30)).unwrap(), Decimal::from(35));
        assert!(debitar(Decimal::MIN, Decimal::MAX).is_err());
    }

    #[test]
    fn em_branco_rejeita_so_espacos() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("Boa participação").is_ok());
    }
}
