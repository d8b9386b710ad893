// src/services/cadastro_service.rs
//
// Cadastros simples: instituições, alunos e empresas parceiras.

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::Store,
    models::{
        aluno::{Aluno, NovoAluno},
        empresa::{EmpresaParceira, NovaEmpresa},
        instituicao::InstituicaoEnsino,
    },
};

#[derive(Clone)]
pub struct CadastroService {
    store: Arc<dyn Store>,
}

impl CadastroService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn listar_instituicoes(&self) -> Result<Vec<InstituicaoEnsino>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_instituicoes().await
    }

    pub async fn criar_instituicao(&self, nome: &str) -> Result<InstituicaoEnsino, AppError> {
        let mut uow = self.store.begin().await?;
        let instituicao = uow.insert_instituicao(nome).await?;
        uow.commit().await?;
        Ok(instituicao)
    }

    pub async fn listar_alunos(&self) -> Result<Vec<Aluno>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_alunos().await
    }

    pub async fn buscar_aluno(&self, id: i64) -> Result<Aluno, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_aluno(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Aluno", id))
    }

    /// Aluno novo começa com saldo zero.
    pub async fn criar_aluno(&self, novo: NovoAluno) -> Result<Aluno, AppError> {
        let mut uow = self.store.begin().await?;
        if uow.find_aluno_by_email(&novo.email).await?.is_some() {
            return Err(AppError::Conflito(format!("Email já cadastrado: {}", novo.email)));
        }
        let aluno = uow.insert_aluno(&novo).await?;
        uow.commit().await?;
        tracing::info!("Aluno {} cadastrado (ID {})", aluno.email, aluno.id);
        Ok(aluno)
    }

    pub async fn listar_empresas(&self) -> Result<Vec<EmpresaParceira>, AppError> {
        let mut uow = self.store.begin().await?;
        uow.list_empresas().await
    }

    pub async fn buscar_empresa(&self, id: i64) -> Result<EmpresaParceira, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_empresa(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Empresa parceira", id))
    }

    pub async fn criar_empresa(&self, nova: NovaEmpresa) -> Result<EmpresaParceira, AppError> {
        let mut uow = self.store.begin().await?;
        let empresa = uow.insert_empresa(&nova).await?;
        uow.commit().await?;
        Ok(empresa)
    }
}
