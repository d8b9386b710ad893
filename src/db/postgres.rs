// src/db/postgres.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    common::error::AppError,
    db::{
        store::{Store, UnitOfWork},
        AlunoRepository, CupomRepository, EmpresaRepository, InstituicaoRepository,
        ProfessorRepository, TransacaoRepository, VantagemRepository,
    },
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

#[derive(Clone, Default)]
struct Repositorios {
    instituicoes: InstituicaoRepository,
    professores: ProfessorRepository,
    alunos: AlunoRepository,
    empresas: EmpresaRepository,
    vantagens: VantagemRepository,
    cupons: CupomRepository,
    transacoes: TransacaoRepository,
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    repos: Repositorios,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repos: Repositorios::default(),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork {
            tx,
            repos: self.repos.clone(),
        }))
    }
}

// Uma transação do Postgres. Se for descartada sem commit, o sqlx faz rollback no drop.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
    repos: Repositorios,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn insert_instituicao(&mut self, nome: &str) -> Result<InstituicaoEnsino, AppError> {
        self.repos.instituicoes.create(&mut *self.tx, nome).await
    }

    async fn find_instituicao(&mut self, id: i64) -> Result<Option<InstituicaoEnsino>, AppError> {
        self.repos.instituicoes.find_by_id(&mut *self.tx, id).await
    }

    async fn list_instituicoes(&mut self) -> Result<Vec<InstituicaoEnsino>, AppError> {
        self.repos.instituicoes.list(&mut *self.tx).await
    }

    async fn list_professores(&mut self) -> Result<Vec<Professor>, AppError> {
        self.repos.professores.list(&mut *self.tx).await
    }

    async fn find_professor(&mut self, id: i64) -> Result<Option<Professor>, AppError> {
        self.repos.professores.find_by_id(&mut *self.tx, id).await
    }

    async fn find_professor_for_update(&mut self, id: i64) -> Result<Option<Professor>, AppError> {
        self.repos.professores.find_by_id_for_update(&mut *self.tx, id).await
    }

    async fn find_professor_by_email(&mut self, email: &str) -> Result<Option<Professor>, AppError> {
        self.repos.professores.find_by_email(&mut *self.tx, email).await
    }

    async fn find_professor_by_login(&mut self, login: &str) -> Result<Option<Professor>, AppError> {
        self.repos.professores.find_by_login(&mut *self.tx, login).await
    }

    async fn find_professor_by_documento(
        &mut self,
        documento: &str,
    ) -> Result<Option<Professor>, AppError> {
        self.repos.professores.find_by_documento(&mut *self.tx, documento).await
    }

    async fn insert_professor(&mut self, novo: &NovoProfessor) -> Result<Professor, AppError> {
        self.repos.professores.create(&mut *self.tx, novo).await
    }

    async fn update_professor(&mut self, professor: &Professor) -> Result<Professor, AppError> {
        self.repos.professores.update(&mut *self.tx, professor).await
    }

    async fn update_professor_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError> {
        self.repos.professores.update_saldo(&mut *self.tx, id, saldo).await
    }

    async fn delete_professor(&mut self, id: i64) -> Result<bool, AppError> {
        self.repos.professores.delete(&mut *self.tx, id).await
    }

    async fn list_alunos(&mut self) -> Result<Vec<Aluno>, AppError> {
        self.repos.alunos.list(&mut *self.tx).await
    }

    async fn find_aluno(&mut self, id: i64) -> Result<Option<Aluno>, AppError> {
        self.repos.alunos.find_by_id(&mut *self.tx, id).await
    }

    async fn find_aluno_for_update(&mut self, id: i64) -> Result<Option<Aluno>, AppError> {
        self.repos.alunos.find_by_id_for_update(&mut *self.tx, id).await
    }

    async fn find_aluno_by_email(&mut self, email: &str) -> Result<Option<Aluno>, AppError> {
        self.repos.alunos.find_by_email(&mut *self.tx, email).await
    }

    async fn insert_aluno(&mut self, novo: &NovoAluno) -> Result<Aluno, AppError> {
        self.repos.alunos.create(&mut *self.tx, novo).await
    }

    async fn update_aluno_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError> {
        self.repos.alunos.update_saldo(&mut *self.tx, id, saldo).await
    }

    async fn list_empresas(&mut self) -> Result<Vec<EmpresaParceira>, AppError> {
        self.repos.empresas.list(&mut *self.tx).await
    }

    async fn find_empresa(&mut self, id: i64) -> Result<Option<EmpresaParceira>, AppError> {
        self.repos.empresas.find_by_id(&mut *self.tx, id).await
    }

    async fn insert_empresa(&mut self, nova: &NovaEmpresa) -> Result<EmpresaParceira, AppError> {
        self.repos.empresas.create(&mut *self.tx, nova).await
    }

    async fn list_vantagens(
        &mut self,
        empresa_id: Option<i64>,
        paginacao: &Paginacao,
    ) -> Result<(Vec<Vantagem>, i64), AppError> {
        let total = self.repos.vantagens.count(&mut *self.tx, empresa_id).await?;
        let pagina = self
            .repos
            .vantagens
            .list_page(&mut *self.tx, empresa_id, paginacao)
            .await?;
        Ok((pagina, total))
    }

    async fn find_vantagem(&mut self, id: i64) -> Result<Option<Vantagem>, AppError> {
        self.repos.vantagens.find_by_id(&mut *self.tx, id).await
    }

    async fn insert_vantagem(&mut self, nova: &NovaVantagem) -> Result<Vantagem, AppError> {
        self.repos.vantagens.create(&mut *self.tx, nova).await
    }

    async fn update_vantagem(&mut self, vantagem: &Vantagem) -> Result<Vantagem, AppError> {
        self.repos.vantagens.update(&mut *self.tx, vantagem).await
    }

    async fn delete_vantagem(&mut self, id: i64) -> Result<bool, AppError> {
        self.repos.vantagens.delete(&mut *self.tx, id).await
    }

    async fn insert_cupom(&mut self, novo: &NovoCupom) -> Result<Cupom, AppError> {
        self.repos.cupons.create(&mut *self.tx, novo).await
    }

    async fn find_cupom_by_codigo(&mut self, codigo: &str) -> Result<Option<Cupom>, AppError> {
        self.repos.cupons.find_by_codigo(&mut *self.tx, codigo).await
    }

    async fn list_cupons_by_aluno(&mut self, aluno_id: i64) -> Result<Vec<Cupom>, AppError> {
        self.repos.cupons.list_by_aluno(&mut *self.tx, aluno_id).await
    }

    async fn marcar_cupom_utilizado(&mut self, cupom: &Cupom) -> Result<Cupom, AppError> {
        self.repos.cupons.marcar_utilizado(&mut *self.tx, cupom).await
    }

    async fn insert_transacao(&mut self, nova: &NovaTransacao) -> Result<Transacao, AppError> {
        self.repos.transacoes.record(&mut *self.tx, nova).await
    }

    async fn find_transacao(&mut self, id: i64) -> Result<Option<TransacaoResponse>, AppError> {
        self.repos.transacoes.find_by_id(&mut *self.tx, id).await
    }

    async fn list_transacoes(&mut self) -> Result<Vec<TransacaoResponse>, AppError> {
        self.repos.transacoes.list(&mut *self.tx).await
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
