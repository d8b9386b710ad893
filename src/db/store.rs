// src/db/store.rs

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{
        aluno::{Aluno, NovoAluno},
        cupom::{Cupom, NovoCupom},
        empresa::{EmpresaParceira, NovaEmpresa},
        instituicao::InstituicaoEnsino,
        paginacao::Paginacao,
        professor::{NovoProfessor, Professor},
        transacao::{NovaTransacao, Transacao, TransacaoResponse},
        vantagem::{NovaVantagem, Vantagem},
    },
};

/// Ponto de entrada da persistência: cada requisição abre a sua unidade de trabalho.
#[async_trait]
pub trait Store: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError>;
}

/// Unidade de trabalho tudo-ou-nada.
///
/// Nada do que for escrito aqui fica visível para outras unidades antes de
/// `commit`. Descartar a unidade sem chamar `commit` desfaz tudo.
///
/// Os métodos `*_for_update` travam a linha até o fim da unidade; use-os antes
/// de mexer em saldos.
#[async_trait]
pub trait UnitOfWork: Send {
    // --- Instituições ---
    async fn insert_instituicao(&mut self, nome: &str) -> Result<InstituicaoEnsino, AppError>;
    async fn find_instituicao(&mut self, id: i64) -> Result<Option<InstituicaoEnsino>, AppError>;
    async fn list_instituicoes(&mut self) -> Result<Vec<InstituicaoEnsino>, AppError>;

    // --- Professores ---
    async fn list_professores(&mut self) -> Result<Vec<Professor>, AppError>;
    async fn find_professor(&mut self, id: i64) -> Result<Option<Professor>, AppError>;
    async fn find_professor_for_update(&mut self, id: i64) -> Result<Option<Professor>, AppError>;
    async fn find_professor_by_email(&mut self, email: &str) -> Result<Option<Professor>, AppError>;
    async fn find_professor_by_login(&mut self, login: &str) -> Result<Option<Professor>, AppError>;
    async fn find_professor_by_documento(
        &mut self,
        documento: &str,
    ) -> Result<Option<Professor>, AppError>;
    async fn insert_professor(&mut self, novo: &NovoProfessor) -> Result<Professor, AppError>;
    async fn update_professor(&mut self, professor: &Professor) -> Result<Professor, AppError>;
    async fn update_professor_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError>;
    async fn delete_professor(&mut self, id: i64) -> Result<bool, AppError>;

    // --- Alunos ---
    async fn list_alunos(&mut self) -> Result<Vec<Aluno>, AppError>;
    async fn find_aluno(&mut self, id: i64) -> Result<Option<Aluno>, AppError>;
    async fn find_aluno_for_update(&mut self, id: i64) -> Result<Option<Aluno>, AppError>;
    async fn find_aluno_by_email(&mut self, email: &str) -> Result<Option<Aluno>, AppError>;
    async fn insert_aluno(&mut self, novo: &NovoAluno) -> Result<Aluno, AppError>;
    async fn update_aluno_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError>;

    // --- Empresas parceiras ---
    async fn list_empresas(&mut self) -> Result<Vec<EmpresaParceira>, AppError>;
    async fn find_empresa(&mut self, id: i64) -> Result<Option<EmpresaParceira>, AppError>;
    async fn insert_empresa(&mut self, nova: &NovaEmpresa) -> Result<EmpresaParceira, AppError>;

    // --- Vantagens ---
    /// Página de vantagens (opcionalmente de uma empresa) e o total de itens.
    async fn list_vantagens(
        &mut self,
        empresa_id: Option<i64>,
        paginacao: &Paginacao,
    ) -> Result<(Vec<Vantagem>, i64), AppError>;
    async fn find_vantagem(&mut self, id: i64) -> Result<Option<Vantagem>, AppError>;
    async fn insert_vantagem(&mut self, nova: &NovaVantagem) -> Result<Vantagem, AppError>;
    async fn update_vantagem(&mut self, vantagem: &Vantagem) -> Result<Vantagem, AppError>;
    async fn delete_vantagem(&mut self, id: i64) -> Result<bool, AppError>;

    // --- Cupons ---
    async fn insert_cupom(&mut self, novo: &NovoCupom) -> Result<Cupom, AppError>;
    async fn find_cupom_by_codigo(&mut self, codigo: &str) -> Result<Option<Cupom>, AppError>;
    async fn list_cupons_by_aluno(&mut self, aluno_id: i64) -> Result<Vec<Cupom>, AppError>;
    async fn marcar_cupom_utilizado(&mut self, cupom: &Cupom) -> Result<Cupom, AppError>;

    // --- Transações (somente inserção e leitura) ---
    async fn insert_transacao(&mut self, nova: &NovaTransacao) -> Result<Transacao, AppError>;
    async fn find_transacao(&mut self, id: i64) -> Result<Option<TransacaoResponse>, AppError>;
    async fn list_transacoes(&mut self) -> Result<Vec<TransacaoResponse>, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
