// src/services/vantagem_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, validation::debitar},
    db::{Store, UnitOfWork},
    models::{
        cupom::{Cupom, NovoCupom},
        empresa::EmpresaParceira,
        paginacao::{PageResponse, Paginacao},
        transacao::{NovaTransacao, TipoTransacao},
        vantagem::{decodificar_foto, NovaVantagem, ResgateVantagemResponse, Vantagem, VantagemResponse},
    },
    services::email_service::Notificador,
};

// Quantas vezes um código de cupom repetido é sorteado de novo antes de desistir
const TENTATIVAS_CODIGO_CUPOM: usize = 5;

// Dados de cadastro/atualização de vantagem. `foto` chega em base64.
#[derive(Debug, Clone)]
pub struct DadosVantagem {
    pub descricao: String,
    pub foto: Option<String>,
    pub custo_moedas: Decimal,
    pub empresa_id: Option<i64>,
}

/// `CUPOM-<vantagem>-<aluno>-<timestamp unix>-<4 dígitos>`
pub fn gerar_codigo_cupom(vantagem_id: i64, aluno_id: i64) -> String {
    let aleatorio: u32 = rand::thread_rng().gen_range(0..10_000);
    format!(
        "CUPOM-{}-{}-{}-{:04}",
        vantagem_id,
        aluno_id,
        Utc::now().timestamp(),
        aleatorio
    )
}

#[derive(Clone)]
pub struct VantagemService {
    store: Arc<dyn Store>,
    notificador: Arc<dyn Notificador>,
}

impl VantagemService {
    pub fn new(store: Arc<dyn Store>, notificador: Arc<dyn Notificador>) -> Self {
        Self { store, notificador }
    }

    pub async fn listar_todas(
        &self,
        paginacao: &Paginacao,
    ) -> Result<PageResponse<VantagemResponse>, AppError> {
        self.listar(None, paginacao).await
    }

    pub async fn listar_por_empresa(
        &self,
        empresa_id: i64,
        paginacao: &Paginacao,
    ) -> Result<PageResponse<VantagemResponse>, AppError> {
        self.listar(Some(empresa_id), paginacao).await
    }

    async fn listar(
        &self,
        empresa_id: Option<i64>,
        paginacao: &Paginacao,
    ) -> Result<PageResponse<VantagemResponse>, AppError> {
        let mut uow = self.store.begin().await?;
        let (vantagens, total) = uow.list_vantagens(empresa_id, paginacao).await?;

        let empresas: HashMap<i64, EmpresaParceira> = uow
            .list_empresas()
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        let itens = vantagens
            .into_iter()
            .map(|v| {
                let empresa = v.empresa_id.and_then(|id| empresas.get(&id));
                VantagemResponse::from_vantagem(v, empresa)
            })
            .collect();
        Ok(PageResponse::new(itens, total, paginacao))
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<VantagemResponse, AppError> {
        let mut uow = self.store.begin().await?;
        let vantagem = uow
            .find_vantagem(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Vantagem", id))?;
        resposta(&mut *uow, vantagem).await
    }

    pub async fn criar(&self, dados: DadosVantagem) -> Result<VantagemResponse, AppError> {
        let mut uow = self.store.begin().await?;
        if let Some(empresa_id) = dados.empresa_id {
            checar_empresa(&mut *uow, empresa_id).await?;
        }

        let vantagem = uow
            .insert_vantagem(&NovaVantagem {
                descricao: dados.descricao,
                foto: decodificar_foto(dados.foto.as_deref()),
                custo_moedas: dados.custo_moedas,
                empresa_id: dados.empresa_id,
            })
            .await?;
        let resposta = resposta(&mut *uow, vantagem).await?;
        uow.commit().await?;
        Ok(resposta)
    }

    /// Foto inválida ou ausente mantém a atual; sem `empresa_id` o vínculo atual é mantido.
    pub async fn atualizar(&self, id: i64, dados: DadosVantagem) -> Result<VantagemResponse, AppError> {
        let mut uow = self.store.begin().await?;
        let mut vantagem = uow
            .find_vantagem(id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Vantagem", id))?;

        if let Some(empresa_id) = dados.empresa_id {
            checar_empresa(&mut *uow, empresa_id).await?;
            vantagem.empresa_id = Some(empresa_id);
        }
        vantagem.descricao = dados.descricao;
        vantagem.custo_moedas = dados.custo_moedas;
        if let Some(foto) = decodificar_foto(dados.foto.as_deref()) {
            vantagem.foto = Some(foto);
        }

        let vantagem = uow.update_vantagem(&vantagem).await?;
        let resposta = resposta(&mut *uow, vantagem).await?;
        uow.commit().await?;
        Ok(resposta)
    }

    pub async fn deletar(&self, id: i64) -> Result<(), AppError> {
        let mut uow = self.store.begin().await?;
        if !uow.delete_vantagem(id).await? {
            return Err(AppError::nao_encontrado("Vantagem", id));
        }
        uow.commit().await?;
        Ok(())
    }

    /// Troca moedas do aluno por um cupom da vantagem.
    ///
    /// Débito, transação RESGATE e cupom são gravados juntos. Aluno e empresa
    /// são notificados depois do commit.
    pub async fn resgatar(
        &self,
        vantagem_id: i64,
        aluno_id: i64,
    ) -> Result<ResgateVantagemResponse, AppError> {
        let mut uow = self.store.begin().await?;

        let vantagem = uow
            .find_vantagem(vantagem_id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Vantagem", vantagem_id))?;
        let mut aluno = uow
            .find_aluno_for_update(aluno_id)
            .await?
            .ok_or_else(|| AppError::nao_encontrado("Aluno", aluno_id))?;

        if aluno.saldo_moedas < vantagem.custo_moedas {
            tracing::warn!(
                "Resgate recusado: aluno {} tem {} e a vantagem {} custa {}",
                aluno.id,
                aluno.saldo_moedas,
                vantagem.id,
                vantagem.custo_moedas
            );
            return Err(AppError::SaldoInsuficiente {
                disponivel: aluno.saldo_moedas,
                necessario: vantagem.custo_moedas,
            });
        }

        let empresa = match vantagem.empresa_id {
            Some(id) => uow.find_empresa(id).await?,
            None => None,
        };

        aluno.saldo_moedas = debitar(aluno.saldo_moedas, vantagem.custo_moedas)?;
        uow.update_aluno_saldo(aluno.id, aluno.saldo_moedas).await?;

        let agora = Utc::now();
        uow.insert_transacao(&NovaTransacao {
            usuario_id: aluno.id,
            usuario_destino_id: None,
            data: agora,
            valor: vantagem.custo_moedas,
            tipo: TipoTransacao::Resgate,
            motivo: format!("Resgate de vantagem: {}", vantagem.descricao),
        })
        .await?;

        let codigo = codigo_livre(&mut *uow, vantagem.id, aluno.id).await?;
        let cupom = uow
            .insert_cupom(&NovoCupom::emitir(
                codigo,
                agora,
                aluno.id,
                vantagem.id,
                empresa.as_ref().map(|e| e.id),
            ))
            .await?;

        uow.commit().await?;

        tracing::info!(
            "Aluno {} resgatou a vantagem {} (cupom {})",
            aluno.id,
            vantagem.id,
            cupom.codigo
        );

        if let Err(e) = self
            .notificador
            .enviar_cupom_aluno(&aluno, &cupom, &vantagem.descricao)
        {
            tracing::warn!("Falha ao enviar o cupom ao aluno {}: {}", aluno.id, e);
        }
        if let Some(empresa) = &empresa {
            if let Err(e) = self.notificador.enviar_notificacao_empresa(
                empresa,
                &aluno,
                &cupom,
                &vantagem.descricao,
                vantagem.custo_moedas,
            ) {
                tracing::warn!("Falha ao notificar a empresa {}: {}", empresa.id, e);
            }
        }

        Ok(ResgateVantagemResponse {
            vantagem_id: vantagem.id,
            vantagem_descricao: vantagem.descricao,
            custo_moedas: vantagem.custo_moedas,
            codigo_cupom: cupom.codigo,
            data_resgate: cupom.data_geracao,
            novo_saldo: aluno.saldo_moedas,
            email_aluno: aluno.email,
            nome_aluno: aluno.nome,
            empresa_nome: empresa.as_ref().map(|e| e.nome_exibicao().to_string()),
            email_empresa: empresa.map(|e| e.email),
            email_enviado: true,
        })
    }

    pub async fn listar_cupons_aluno(&self, aluno_id: i64) -> Result<Vec<Cupom>, AppError> {
        let mut uow = self.store.begin().await?;
        if uow.find_aluno(aluno_id).await?.is_none() {
            return Err(AppError::nao_encontrado("Aluno", aluno_id));
        }
        uow.list_cupons_by_aluno(aluno_id).await
    }

    pub async fn buscar_cupom(&self, codigo: &str) -> Result<Cupom, AppError> {
        let mut uow = self.store.begin().await?;
        uow.find_cupom_by_codigo(codigo)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado(format!("Cupom não encontrado: {codigo}")))
    }

    /// Marca o cupom como utilizado. Só vale para cupom válido, não usado e dentro da validade.
    pub async fn utilizar_cupom(&self, codigo: &str) -> Result<Cupom, AppError> {
        let mut uow = self.store.begin().await?;
        let mut cupom = uow
            .find_cupom_by_codigo(codigo)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado(format!("Cupom não encontrado: {codigo}")))?;

        let agora = Utc::now();
        if cupom.utilizado {
            return Err(AppError::Validacao(format!("Cupom já utilizado: {codigo}")));
        }
        if !cupom.valido {
            return Err(AppError::Validacao(format!("Cupom inválido: {codigo}")));
        }
        if cupom.expirado(agora) {
            return Err(AppError::Validacao(format!("Cupom expirado: {codigo}")));
        }

        cupom.utilizado = true;
        cupom.valido = false;
        cupom.data_utilizacao = Some(agora);
        let cupom = uow.marcar_cupom_utilizado(&cupom).await?;
        uow.commit().await?;

        tracing::info!("Cupom {} utilizado", cupom.codigo);
        Ok(cupom)
    }
}

async fn resposta(uow: &mut dyn UnitOfWork, vantagem: Vantagem) -> Result<VantagemResponse, AppError> {
    let empresa = match vantagem.empresa_id {
        Some(id) => uow.find_empresa(id).await?,
        None => None,
    };
    Ok(VantagemResponse::from_vantagem(vantagem, empresa.as_ref()))
}

async fn checar_empresa(uow: &mut dyn UnitOfWork, id: i64) -> Result<(), AppError> {
    match uow.find_empresa(id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Validacao(format!(
            "Empresa parceira não encontrada com ID: {id}"
        ))),
    }
}

async fn codigo_livre(
    uow: &mut dyn UnitOfWork,
    vantagem_id: i64,
    aluno_id: i64,
) -> Result<String, AppError> {
    for _ in 0..TENTATIVAS_CODIGO_CUPOM {
        let codigo = gerar_codigo_cupom(vantagem_id, aluno_id);
        if uow.find_cupom_by_codigo(&codigo).await?.is_none() {
            return Ok(codigo);
        }
    }
    Err(AppError::Conflito(
        "Não foi possível gerar um código de cupom único".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::paginacao::{Direcao, OrdemVantagem};
    use crate::services::fixtures::{Cenario, NotificadorFalho};

    fn dados(descricao: &str, custo: i64, empresa_id: Option<i64>) -> DadosVantagem {
        DadosVantagem {
            descricao: descricao.into(),
            foto: None,
            custo_moedas: Decimal::from(custo),
            empresa_id,
        }
    }

    fn pagina(page: u32, size: u32, ordem: OrdemVantagem, direcao: Direcao) -> Paginacao {
        Paginacao { page, size, ordem, direcao }
    }

    // CUPOM-<n>-<n>-<n>-<4 dígitos>
    fn codigo_no_formato(codigo: &str, vantagem_id: i64, aluno_id: i64) -> bool {
        let partes: Vec<&str> = codigo.split('-').collect();
        partes.len() == 5
            && partes[0] == "CUPOM"
            && partes[1] == vantagem_id.to_string()
            && partes[2] == aluno_id.to_string()
            && !partes[3].is_empty()
            && partes[3].chars().all(|c| c.is_ascii_digit())
            && partes[4].len() == 4
            && partes[4].chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn codigo_gerado_segue_o_formato() {
        for _ in 0..50 {
            assert!(codigo_no_formato(&gerar_codigo_cupom(7, 12), 7, 12));
        }
    }

    #[tokio::test]
    async fn resgate_debita_registra_e_emite_cupom() {
        let cenario = Cenario::new().await;
        let empresa_id = cenario.nova_empresa().await;
        let aluno_id = cenario.novo_aluno(Decimal::from(80)).await;
        let service = cenario.vantagem_service();
        let vantagem = service.criar(dados("Café grátis", 50, Some(empresa_id))).await.unwrap();

        let resposta = service.resgatar(vantagem.id, aluno_id).await.unwrap();

        assert_eq!(resposta.novo_saldo, Decimal::from(30));
        assert_eq!(resposta.custo_moedas, Decimal::from(50));
        assert_eq!(resposta.empresa_nome.as_deref(), Some("Cantina"));
        assert_eq!(resposta.email_empresa.as_deref(), Some("cantina@puc.br"));
        assert!(resposta.email_enviado);
        assert!(codigo_no_formato(&resposta.codigo_cupom, vantagem.id, aluno_id));
        assert_eq!(cenario.aluno(aluno_id).await.saldo_moedas, Decimal::from(30));

        let transacoes = cenario.transacoes().await;
        assert_eq!(transacoes.len(), 1);
        assert_eq!(transacoes[0].tipo, TipoTransacao::Resgate);
        assert_eq!(transacoes[0].valor, Decimal::from(50));
        assert_eq!(transacoes[0].usuario_id, aluno_id);
        assert_eq!(transacoes[0].motivo, "Resgate de vantagem: Café grátis");

        let cupom = service.buscar_cupom(&resposta.codigo_cupom).await.unwrap();
        assert!(cupom.valido);
        assert!(!cupom.utilizado);
        assert_eq!(cupom.data_vencimento - cupom.data_geracao, chrono::Duration::days(30));
        assert_eq!(cupom.empresa_id, Some(empresa_id));
    }

    #[tokio::test]
    async fn resgate_sem_saldo_nao_mexe_em_nada() {
        let cenario = Cenario::new().await;
        let aluno_id = cenario.novo_aluno(Decimal::from(20)).await;
        let service = cenario.vantagem_service();
        let vantagem = service.criar(dados("Livro", 50, None)).await.unwrap();

        let err = service.resgatar(vantagem.id, aluno_id).await.unwrap_err();

        assert!(matches!(err, AppError::SaldoInsuficiente { .. }));
        assert_eq!(cenario.aluno(aluno_id).await.saldo_moedas, Decimal::from(20));
        assert!(cenario.transacoes().await.is_empty());
        assert!(service.listar_cupons_aluno(aluno_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resgate_de_vantagem_inexistente() {
        let cenario = Cenario::new().await;
        let aluno_id = cenario.novo_aluno(Decimal::from(20)).await;
        let err = cenario.vantagem_service().resgatar(999, aluno_id).await.unwrap_err();
        assert!(matches!(err, AppError::NaoEncontrado(_)));
    }

    #[tokio::test]
    async fn falha_na_notificacao_nao_desfaz_o_resgate() {
        let cenario = Cenario::new().await;
        let empresa_id = cenario.nova_empresa().await;
        let aluno_id = cenario.novo_aluno(Decimal::from(60)).await;
        let service = VantagemService::new(cenario.store.clone(), Arc::new(NotificadorFalho));
        let vantagem = service.criar(dados("Café grátis", 50, Some(empresa_id))).await.unwrap();

        let resposta = service.resgatar(vantagem.id, aluno_id).await.unwrap();

        assert_eq!(resposta.novo_saldo, Decimal::from(10));
        assert_eq!(cenario.transacoes().await.len(), 1);
        assert_eq!(service.listar_cupons_aluno(aluno_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cupom_so_pode_ser_utilizado_uma_vez() {
        let cenario = Cenario::new().await;
        let aluno_id = cenario.novo_aluno(Decimal::from(60)).await;
        let service = cenario.vantagem_service();
        let vantagem = service.criar(dados("Café grátis", 10, None)).await.unwrap();
        let resgate = service.resgatar(vantagem.id, aluno_id).await.unwrap();

        let usado = service.utilizar_cupom(&resgate.codigo_cupom).await.unwrap();
        assert!(usado.utilizado);
        assert!(usado.data_utilizacao.is_some());

        let err = service.utilizar_cupom(&resgate.codigo_cupom).await.unwrap_err();
        assert!(matches!(err, AppError::Validacao(_)));

        let err = service.utilizar_cupom("CUPOM-NAO-EXISTE").await.unwrap_err();
        assert!(matches!(err, AppError::NaoEncontrado(_)));
    }

    #[tokio::test]
    async fn paginacao_ordena_e_filtra_por_empresa() {
        let cenario = Cenario::new().await;
        let empresa_id = cenario.nova_empresa().await;
        let service = cenario.vantagem_service();
        service.criar(dados("Bolo", 30, Some(empresa_id))).await.unwrap();
        service.criar(dados("Almoço", 80, None)).await.unwrap();
        service.criar(dados("Café", 10, Some(empresa_id))).await.unwrap();

        let page = service
            .listar_todas(&pagina(0, 2, OrdemVantagem::CustoMoedas, Direcao::Desc))
            .await
            .unwrap();
        let descricoes: Vec<&str> = page.items.iter().map(|v| v.descricao.as_str()).collect();
        assert_eq!(descricoes, vec!["Almoço", "Bolo"]);
        assert_eq!(page.pagination.total_items, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_next);

        let da_empresa = service
            .listar_por_empresa(empresa_id, &pagina(0, 10, OrdemVantagem::Descricao, Direcao::Asc))
            .await
            .unwrap();
        let descricoes: Vec<&str> = da_empresa.items.iter().map(|v| v.descricao.as_str()).collect();
        assert_eq!(descricoes, vec!["Bolo", "Café"]);
        assert!(da_empresa.items.iter().all(|v| v.empresa_nome.as_deref() == Some("Cantina")));
    }

    #[tokio::test]
    async fn foto_invalida_na_atualizacao_mantem_a_atual() {
        let cenario = Cenario::new().await;
        let service = cenario.vantagem_service();
        let mut com_foto = dados("Café", 10, None);
        com_foto.foto = Some("aGk=".into());
        let criada = service.criar(com_foto).await.unwrap();

        let mut nova = dados("Café expresso", 12, None);
        nova.foto = Some("%%%".into());
        let atualizada = service.atualizar(criada.id, nova).await.unwrap();

        assert_eq!(atualizada.descricao, "Café expresso");
        assert_eq!(atualizada.foto.as_deref(), Some("aGk="));
    }

    #[tokio::test]
    async fn empresa_inexistente_e_erro_de_validacao() {
        let cenario = Cenario::new().await;
        let err = cenario
            .vantagem_service()
            .criar(dados("Café", 10, Some(4242)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validacao(_)));
    }
}
