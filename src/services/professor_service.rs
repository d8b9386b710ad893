// src/services/professor_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        validation::{checar_quantidade, creditar, debitar},
    },
    db::{Store, UnitOfWork},
    models::{
        professor::{
            AdicionarMoedasResponse, DadosProfessor, EnviarMoedasResponse, NovoProfessor, Professor,
            ProfessorResponse,
        },
        transacao::{NovaTransacao, TipoTransacao},
    },
    services::email_service::Notificador,
};

pub const MOTIVO_CREDITO_SEMESTRAL: &str = "Crédito semestral de moedas";

#[derive(Clone)]
pub struct ProfessorService {
    store: Arc<dyn Store>,
    notificador: Arc<dyn Notificador>,
    bcrypt_cost: u32,
}

impl ProfessorService {
    pub fn new(store: Arc<dyn Store>, notificador: Arc<dyn Notificador>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            notificador,
            bcrypt_cost,
        }
    }

    pub async fn listar_todos(&self) -> Result<Vec<ProfessorResponse>, AppError> {
        let mut uow = self.store.begin().await?;
        let nomes: HashMap<i64, String> = uow
            .list_instituicoes()
            .await?
            .into_iter()
            .map(|i| (i.id, i.nome))
            .collect();

        let professores = uow.list_professores().await?;
        Ok(professores
            .into_iter()
            .map(|p| {
                let nome = p.instituicao_id.and_then(|id| nomes.get(&id).cloned());
                ProfessorResponse::from_professor(p, nome)
            })
            .collect())
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<ProfessorResponse, AppError> {
        let mut uow = self.store.begin().await?;
        let professor = uow
            .find_professor(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Professor", id))?;
        resposta(&mut *uow, professor).await
    }

    pub async fn criar(&self, dados: DadosProfessor) -> Result<ProfessorResponse, AppError> {
        let senha_hash = self.hash_senha(dados.senha.clone()).await?;

        let mut uow = self.store.begin().await?;
        checar_duplicados(&mut *uow, None, &dados).await?;
        checar_instituicao(&mut *uow, dados.instituicao_id).await?;

        let novo = NovoProfessor {
            nome: dados.nome,
            documento: dados.documento,
            email: dados.email,
            login: dados.login,
            senha_hash,
            departamento: dados.departamento,
            instituicao_id: dados.instituicao_id,
        };
        let professor = uow.insert_professor(&novo).await?;
        let resposta = resposta(&mut *uow, professor).await?;
        uow.commit().await?;

        tracing::info!("Professor {} cadastrado (ID {})", resposta.login, resposta.id);
        Ok(resposta)
    }

    pub async fn atualizar(&self, id: i64, dados: DadosProfessor) -> Result<ProfessorResponse, AppError> {
        let senha_hash = self.hash_senha(dados.senha.clone()).await?;

        let mut uow = self.store.begin().await?;
        let mut professor = uow
            .find_professor_for_update(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Professor", id))?;

        checar_duplicados(&mut *uow, Some(id), &dados).await?;
        checar_instituicao(&mut *uow, dados.instituicao_id).await?;

        professor.senha_hash = senha_hash;
        professor.nome = dados.nome;
        professor.documento = dados.documento;
        professor.email = dados.email;
        professor.login = dados.login;
        professor.departamento = dados.departamento;
        professor.instituicao_id = Some(dados.instituicao_id);

        let professor = uow.update_professor(&professor).await?;
        let resposta = resposta(&mut *uow, professor).await?;
        uow.commit().await?;
        Ok(resposta)
    }

    pub async fn deletar(&self, id: i64) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        if !uow.delete_professor(id).await? {
            return Err(AppError::nao_encontrado("Professor", id));
        }
        uow.commit().await?;
        tracing::info!("Professor {} removido", id);
        Ok(())
    }

    /// Transfere moedas do professor para o aluno e registra a transação.
    ///
    /// O aluno é notificado depois do commit; uma falha na notificação não
    /// desfaz a transferência.
    pub async fn enviar_moedas(
        &self,
        professor_id: i64,
        aluno_id: i64,
        quantidade: Decimal,
        motivo: &str,
    ) -> Result<EnviarMoedasResponse, AppError> {
        checar_quantidade(&quantidade)?;
        if motivo.trim().is_empty() {
            return Err(AppError::Validacao("Motivo é obrigatório".into()));
        }

        let mut uow = self.store.begin().await?;

        // Ordem das travas: professor, depois aluno
        let mut professor = uow
            .find_professor_for_update(professor_id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Professor", professor_id))?;
        let mut aluno = uow
            .find_aluno_for_update(aluno_id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Aluno", aluno_id))?;

        if professor.saldo_moedas < quantidade {
            tracing::warn!(
                "Transferência recusada: professor {} tem {} e tentou enviar {}",
                professor.id,
                professor.saldo_moedas,
                quantidade
            );
            return Err(AppError::SaldoInsuficiente {
                disponivel: professor.saldo_moedas,
                necessario: quantidade,
            });
        }

        professor.saldo_moedas = debitar(professor.saldo_moedas, quantidade)?;
        aluno.saldo_moedas = creditar(aluno.saldo_moedas, quantidade)?;
        uow.update_professor_saldo(professor.id, professor.saldo_moedas).await?;
        uow.update_aluno_saldo(aluno.id, aluno.saldo_moedas).await?;

        let transacao = uow
            .insert_transacao(&NovaTransacao {
                usuario_id: professor.id,
                usuario_destino_id: Some(aluno.id),
                data: Utc::now(),
                valor: quantidade,
                tipo: TipoTransacao::TransferenciaProfessorAluno,
                motivo: motivo.to_string(),
            })
            .await?;

        uow.commit().await?;

        tracing::info!(
            "Professor {} enviou {} moedas ao aluno {} (transação {})",
            professor.id,
            quantidade,
            aluno.id,
            transacao.id
        );

        if let Err(e) = self
            .notificador
            .notificar_recebimento_moedas(&aluno, &professor, quantidade, motivo)
        {
            tracing::warn!("Falha ao notificar o aluno {}: {}", aluno.id, e);
        }

        Ok(EnviarMoedasResponse {
            transacao_id: transacao.id,
            professor_nome: professor.nome,
            aluno_nome: aluno.nome,
            quantidade,
            motivo: transacao.motivo,
            data_transacao: transacao.data,
            saldo_restante_professor: professor.saldo_moedas,
            novo_saldo_aluno: aluno.saldo_moedas,
            mensagem: format!("Transferência de {quantidade:.2} moedas realizada com sucesso!"),
        })
    }

    /// Crédito semestral: soma ao saldo do professor e registra um CREDITO.
    pub async fn adicionar_moedas(
        &self,
        professor_id: i64,
        quantidade: Decimal,
    ) -> Result<AdicionarMoedasResponse, AppError> {
        checar_quantidade(&quantidade)?;

        let mut uow = self.store.begin().await?;
        let mut professor = uow
            .find_professor_for_update(professor_id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Professor", professor_id))?;

        professor.saldo_moedas = creditar(professor.saldo_moedas, quantidade)?;
        uow.update_professor_saldo(professor.id, professor.saldo_moedas).await?;
        uow.insert_transacao(&NovaTransacao {
            usuario_id: professor.id,
            usuario_destino_id: None,
            data: Utc::now(),
            valor: quantidade,
            tipo: TipoTransacao::Credito,
            motivo: MOTIVO_CREDITO_SEMESTRAL.to_string(),
        })
        .await?;
        uow.commit().await?;

        tracing::info!("{} moedas creditadas ao professor {}", quantidade, professor.id);

        Ok(AdicionarMoedasResponse {
            professor_id: professor.id,
            quantidade,
            saldo_moedas: professor.saldo_moedas,
            mensagem: format!(
                "{:.2} moedas adicionadas com sucesso ao professor ID {}",
                quantidade, professor.id
            ),
        })
    }

    async fn hash_senha(&self, senha: String) -> Result<String, AppError> {
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(senha, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hash)
    }
}

async fn resposta(uow: &mut dyn UnitOfWork, professor: Professor) -> Result<ProfessorResponse, AppError> {
    let instituicao_nome = match professor.instituicao_id {
        Some(id) => uow.find_instituicao(id).await?.map(|i| i.nome),
        None => None,
    };
    Ok(ProfessorResponse::from_professor(professor, instituicao_nome))
}

// Um registro nunca conflita consigo mesmo
async fn checar_duplicados(
    uow: &mut dyn UnitOfWork,
    proprio_id: Option<i64>,
    dados: &DadosProfessor,
) -> Result<(), AppError> {
    let outro = |p: &Professor| Some(p.id) != proprio_id;

    if uow.find_professor_by_email(&dados.email).await?.is_some_and(|p| outro(&p)) {
        return Err(AppError::Conflito(format!("Email já cadastrado: {}", dados.email)));
    }
    if uow.find_professor_by_login(&dados.login).await?.is_some_and(|p| outro(&p)) {
        return Err(AppError::Conflito(format!("Login já cadastrado: {}", dados.login)));
    }
    if uow
        .find_professor_by_documento(&dados.documento)
        .await?
        .is_some_and(|p| outro(&p))
    {
        return Err(AppError::Conflito(format!(
            "Documento já cadastrado: {}",
            dados.documento
        )));
    }
    Ok(())
}

async fn checar_instituicao(uow: &mut dyn UnitOfWork, id: i64) -> Result<(), AppError> {
    match uow.find_instituicao(id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Validacao(format!(
            "Instituição não encontrada com ID: {id}"
        ))),
    }
}
