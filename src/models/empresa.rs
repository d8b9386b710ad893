// src/models/empresa.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaParceira {
    pub id: i64,
    pub nome: String,
    pub nome_fantasia: Option<String>,
    pub email: String,
}

impl EmpresaParceira {
    /// Nome fantasia quando preenchido; senão a razão social.
    pub fn nome_exibicao(&self) -> &str {
        match self.nome_fantasia.as_deref() {
            Some(fantasia) if !fantasia.trim().is_empty() => fantasia,
            _ => &self.nome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NovaEmpresa {
    pub nome: String,
    pub nome_fantasia: Option<String>,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empresa(fantasia: Option<&str>) -> EmpresaParceira {
        EmpresaParceira {
            id: 1,
            nome: "Livraria Central LTDA".into(),
            nome_fantasia: fantasia.map(str::to_string),
            email: "contato@livraria.com".into(),
        }
    }

    #[test]
    fn usa_nome_fantasia_quando_presente() {
        assert_eq!(empresa(Some("Livraria Central")).nome_exibicao(), "Livraria Central");
    }

    #[test]
    fn cai_para_nome_quando_fantasia_vazio_ou_ausente() {
        assert_eq!(empresa(Some("  ")).nome_exibicao(), "Livraria Central LTDA");
        assert_eq!(empresa(None).nome_exibicao(), "Livraria Central LTDA");
    }
}
