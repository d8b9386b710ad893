// src/services/fixtures.rs
//
// Cenários de teste sobre o store em memória.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{MemoriaStore, Store},
    models::{
        aluno::{Aluno, NovoAluno},
        cupom::Cupom,
        empresa::{EmpresaParceira, NovaEmpresa},
        professor::{NovoProfessor, Professor},
        transacao::TransacaoResponse,
    },
    services::{
        email_service::{EmailService, Notificador},
        professor_service::ProfessorService,
        transacao_service::TransacaoService,
        vantagem_service::VantagemService,
    },
};

// Custo mínimo aceito pelo bcrypt; deixa o hash rápido nos testes
pub const TEST_BCRYPT_COST: u32 = 4;

/// Notificador que sempre falha.
pub struct NotificadorFalho;

impl Notificador for NotificadorFalho {
    fn notificar_recebimento_moedas(
        &self,
        _aluno: &Aluno,
        _professor: &Professor,
        _quantidade: Decimal,
        _motivo: &str,
    ) -> Result<(), AppError> {
        Err(AppError::Notificacao("servidor de e-mail fora do ar".into()))
    }

    fn enviar_cupom_aluno(&self, _aluno: &Aluno, _cupom: &Cupom, _vantagem: &str) -> Result<(), AppError> {
        Err(AppError::Notificacao("servidor de e-mail fora do ar".into()))
    }

    fn enviar_notificacao_empresa(
        &self,
        _empresa: &EmpresaParceira,
        _aluno: &Aluno,
        _cupom: &Cupom,
        _vantagem: &str,
        _custo: Decimal,
    ) -> Result<(), AppError> {
        Err(AppError::Notificacao("servidor de e-mail fora do ar".into()))
    }
}

pub struct Cenario {
    pub store: Arc<dyn Store>,
    pub instituicao_id: i64,
    sequencia: AtomicUsize,
}

impl Cenario {
    /// Store vazio com uma instituição ("PUC Minas").
    pub async fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoriaStore::new());
        let mut uow = store.begin().await.unwrap();
        let instituicao = uow.insert_instituicao("PUC Minas").await.unwrap();
        uow.commit().await.unwrap();

        Self {
            store,
            instituicao_id: instituicao.id,
            sequencia: AtomicUsize::new(0),
        }
    }

    fn proximo(&self) -> usize {
        self.sequencia.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn professor_service(&self) -> ProfessorService {
        ProfessorService::new(self.store.clone(), Arc::new(EmailService::new()), TEST_BCRYPT_COST)
    }

    pub fn vantagem_service(&self) -> VantagemService {
        VantagemService::new(self.store.clone(), Arc::new(EmailService::new()))
    }

    pub fn transacao_service(&self) -> TransacaoService {
        TransacaoService::new(self.store.clone())
    }

    /// Professor "Professor <n>" com o saldo pedido.
    pub async fn novo_professor(&self, saldo: Decimal) -> i64 {
        let n = self.proximo();
        let mut uow = self.store.begin().await.unwrap();
        let professor = uow
            .insert_professor(&NovoProfessor {
                nome: format!("Professor {n}"),
                documento: format!("doc-{n}"),
                email: format!("professor{n}@puc.br"),
                login: format!("professor{n}"),
                senha_hash: "hash".into(),
                departamento: "DCC".into(),
                instituicao_id: self.instituicao_id,
            })
            .await
            .unwrap();
        uow.update_professor_saldo(professor.id, saldo).await.unwrap();
        uow.commit().await.unwrap();
        professor.id
    }

    pub async fn novo_aluno(&self, saldo: Decimal) -> i64 {
        let n = self.proximo();
        let mut uow = self.store.begin().await.unwrap();
        let aluno = uow
            .insert_aluno(&NovoAluno {
                nome: format!("Aluno {n}"),
                email: format!("aluno{n}@puc.br"),
            })
            .await
            .unwrap();
        uow.update_aluno_saldo(aluno.id, saldo).await.unwrap();
        uow.commit().await.unwrap();
        aluno.id
    }

    /// Empresa com nome fantasia "Cantina".
    pub async fn nova_empresa(&self) -> i64 {
        let mut uow = self.store.begin().await.unwrap();
        let empresa = uow
            .insert_empresa(&NovaEmpresa {
                nome: "Cantina Central LTDA".into(),
                nome_fantasia: Some("Cantina".into()),
                email: "cantina@puc.br".into(),
            })
            .await
            .unwrap();
        uow.commit().await.unwrap();
        empresa.id
    }

    pub async fn professor(&self, id: i64) -> Professor {
        let mut uow = self.store.begin().await.unwrap();
        uow.find_professor(id).await.unwrap().unwrap()
    }

    pub async fn aluno(&self, id: i64) -> Aluno {
        let mut uow = self.store.begin().await.unwrap();
        uow.find_aluno(id).await.unwrap().unwrap()
    }

    pub async fn transacoes(&self) -> Vec<TransacaoResponse> {
        let mut uow = self.store.begin().await.unwrap();
        uow.list_transacoes().await.unwrap()
    }
}
