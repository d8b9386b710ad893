// src/services/email_service.rs
//
// Notificações por e-mail. Nada é transmitido: o texto é montado e registrado em log.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{aluno::Aluno, cupom::Cupom, empresa::EmpresaParceira, professor::Professor},
};

/// Destino das notificações disparadas depois do commit.
///
/// Uma falha aqui nunca desfaz a operação que a originou: os serviços só
/// registram o erro.
pub trait Notificador: Send + Sync {
    fn notificar_recebimento_moedas(
        &self,
        aluno: &Aluno,
        professor: &Professor,
        quantidade: Decimal,
        motivo: &str,
    ) -> Result<(), AppError>;

    fn enviar_cupom_aluno(&self, aluno: &Aluno, cupom: &Cupom, vantagem: &str) -> Result<(), AppError>;

    fn enviar_notificacao_empresa(
        &self,
        empresa: &EmpresaParceira,
        aluno: &Aluno,
        cupom: &Cupom,
        vantagem: &str,
        custo: Decimal,
    ) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub para: String,
    pub assunto: String,
    pub corpo: String,
}

fn formatar_data(data: DateTime<Utc>) -> String {
    data.format("%d/%m/%Y %H:%M").to_string()
}

pub fn email_recebimento_moedas(
    aluno: &Aluno,
    professor: &Professor,
    quantidade: Decimal,
    motivo: &str,
) -> Email {
    Email {
        para: aluno.email.clone(),
        assunto: format!("Você recebeu {quantidade:.2} moedas!"),
        corpo: format!(
            "Olá {},\n\n\
             Você recebeu {:.2} moedas do professor {}.\n\n\
             Motivo: {}\n\n\
             Seu novo saldo é de {:.2} moedas.\n\n\
             Aproveite para trocar suas moedas por vantagens!\n\n\
             Atenciosamente,\n\
             Sistema de Moedas Estudantis",
            aluno.nome, quantidade, professor.nome, motivo, aluno.saldo_moedas
        ),
    }
}

pub fn email_cupom_aluno(aluno: &Aluno, cupom: &Cupom, vantagem: &str) -> Email {
    Email {
        para: aluno.email.clone(),
        assunto: format!("Seu cupom de resgate - {vantagem}"),
        corpo: format!(
            "Olá {},\n\n\
             Parabéns! Você resgatou com sucesso a vantagem: {}\n\n\
             === CÓDIGO DO CUPOM ===\n\
             {}\n\
             =======================\n\n\
             Válido até: {}\n\
             Data de resgate: {}\n\n\
             Por favor, apresente este código no local de resgate da vantagem.\n\
             Este cupom é pessoal e intransferível.\n\n\
             Atenciosamente,\n\
             Sistema de Moedas Estudantis",
            aluno.nome,
            vantagem,
            cupom.codigo,
            formatar_data(cupom.data_vencimento),
            formatar_data(cupom.data_geracao)
        ),
    }
}

pub fn email_notificacao_empresa(
    empresa: &EmpresaParceira,
    aluno: &Aluno,
    cupom: &Cupom,
    vantagem: &str,
    custo: Decimal,
) -> Email {
    Email {
        para: empresa.email.clone(),
        assunto: format!("Novo resgate de cupom - {vantagem}"),
        corpo: format!(
            "Olá {},\n\n\
             Um novo cupom foi resgatado em sua loja!\n\n\
             === DETALHES DO RESGATE ===\n\
             Código do Cupom: {}\n\
             Vantagem: {}\n\
             Valor: {:.2} moedas\n\
             Aluno: {}\n\
             Email do Aluno: {}\n\
             Data do Resgate: {}\n\
             ============================\n\n\
             O aluno deve apresentar este código para utilizar a vantagem.\n\
             Por favor, registre a utilização do cupom em seu sistema.\n\n\
             Atenciosamente,\n\
             Sistema de Moedas Estudantis",
            empresa.nome_exibicao(),
            cupom.codigo,
            vantagem,
            custo,
            aluno.nome,
            aluno.email,
            formatar_data(cupom.data_geracao)
        ),
    }
}

/// Implementação padrão: só registra o e-mail em log.
#[derive(Debug, Clone, Default)]
pub struct EmailService;

impl EmailService {
    pub fn new() -> Self {
        Self
    }

    /// Registra o e-mail; um destinatário sem endereço utilizável é falha de notificação.
    fn registrar(&self, tipo: &str, email: &Email) -> Result<(), AppError> {
        let para = email.para.trim();
        if para.is_empty() || !para.contains('@') {
            return Err(AppError::Notificacao(format!(
                "Destinatário sem endereço de e-mail válido: '{}'",
                email.para
            )));
        }
        tracing::info!(
            para = %email.para,
            assunto = %email.assunto,
            "📧 {}\n{}",
            tipo,
            email.corpo
        );
        Ok(())
    }
}

impl Notificador for EmailService {
    fn notificar_recebimento_moedas(
        &self,
        aluno: &Aluno,
        professor: &Professor,
        quantidade: Decimal,
        motivo: &str,
    ) -> Result<(), AppError> {
        let email = email_recebimento_moedas(aluno, professor, quantidade, motivo);
        self.registrar("EMAIL ENVIADO", &email)
    }

    fn enviar_cupom_aluno(&self, aluno: &Aluno, cupom: &Cupom, vantagem: &str) -> Result<(), AppError> {
        let email = email_cupom_aluno(aluno, cupom, vantagem);
        self.registrar("EMAIL DE CUPOM ENVIADO AO ALUNO", &email)
    }

    fn enviar_notificacao_empresa(
        &self,
        empresa: &EmpresaParceira,
        aluno: &Aluno,
        cupom: &Cupom,
        vantagem: &str,
        custo: Decimal,
    ) -> Result<(), AppError> {
        let email = email_notificacao_empresa(empresa, aluno, cupom, vantagem, custo);
        self.registrar("EMAIL DE NOTIFICAÇÃO ENVIADO À EMPRESA", &email)
    }
}
