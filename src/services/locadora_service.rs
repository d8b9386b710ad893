// src/services/locadora_service.rs
//
// Locadora: pedidos de aluguel (cliente) e avaliação/frota (agente). Tudo em memória.

use rand::Rng;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::MemoryStore,
    models::pedido::{Pedido, StatusPedido, Veiculo},
};

// Ids são sorteados em 100..=999; desiste depois de tantas colisões seguidas
const TENTATIVAS_ID: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct DadosPedido {
    pub car: Option<String>,
    pub client_name: Option<String>,
    pub date: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DadosVeiculo {
    pub modelo: Option<String>,
    pub placa: Option<String>,
    pub ano: Option<i32>,
    pub cor: Option<String>,
    pub diaria: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acao {
    Aprovar,
    Reprovar,
}

impl Acao {
    pub fn parse(acao: &str) -> Option<Self> {
        if acao.eq_ignore_ascii_case("aprovar") {
            Some(Acao::Aprovar)
        } else if acao.eq_ignore_ascii_case("reprovar") {
            Some(Acao::Reprovar)
        } else {
            None
        }
    }

    fn status(&self) -> StatusPedido {
        match self {
            Acao::Aprovar => StatusPedido::Aprovado,
            Acao::Reprovar => StatusPedido::Reprovado,
        }
    }
}

fn inserir_com_id_livre<T: Clone>(
    store: &MemoryStore<T>,
    prefixo: &str,
    criar: impl Fn(String) -> T,
) -> Result<T, AppError> {
    for _ in 0..TENTATIVAS_ID {
        let id = format!("{}-{}", prefixo, rand::thread_rng().gen_range(100..=999));
        let valor = criar(id.clone());
        if store.insert_new(&id, valor.clone()) {
            return Ok(valor);
        }
    }
    Err(AppError::Conflito(format!(
        "Não foi possível gerar um id {prefixo} livre"
    )))
}

#[derive(Clone, Default)]
pub struct LocadoraService {
    pedidos: MemoryStore<Pedido>,
    veiculos: MemoryStore<Veiculo>,
}

impl LocadoraService {
    pub fn new(pedidos: MemoryStore<Pedido>, veiculos: MemoryStore<Veiculo>) -> Self {
        Self { pedidos, veiculos }
    }

    pub fn listar_pedidos(&self) -> Vec<Pedido> {
        let mut pedidos = self.pedidos.list();
        pedidos.sort_by(|a, b| a.id.cmp(&b.id));
        pedidos
    }

    pub fn buscar_pedido(&self, id: &str) -> Result<Pedido, AppError> {
        self.pedidos
            .get(id)
            .ok_or_else(|| AppError::NaoEncontrado(format!("Pedido não encontrado: {id}")))
    }

    /// Campos ausentes recebem valores padrão; todo pedido começa pendente.
    pub fn criar_pedido(&self, dados: DadosPedido) -> Result<Pedido, AppError> {
        let pedido = inserir_com_id_livre(&self.pedidos, "PED", |id| Pedido {
            id,
            car: dados.car.clone().unwrap_or_else(|| "Modelo".into()),
            client_name: dados.client_name.clone().unwrap_or_else(|| "Cliente".into()),
            status: StatusPedido::Pendente,
            date: dados.date.clone().unwrap_or_else(|| "2024-01-20".into()),
            value: dados.value.clone().unwrap_or_else(|| "R$ 100/dia".into()),
        })?;
        tracing::info!("Pedido {} criado para {}", pedido.id, pedido.client_name);
        Ok(pedido)
    }

    /// Atualização parcial: só carro, data e valor podem mudar.
    pub fn atualizar_pedido(&self, id: &str, dados: DadosPedido) -> Result<Pedido, AppError> {
        self.pedidos
            .update(id, |pedido| {
                if let Some(car) = dados.car {
                    pedido.car = car;
                }
                if let Some(date) = dados.date {
                    pedido.date = date;
                }
                if let Some(value) = dados.value {
                    pedido.value = value;
                }
            })
            .ok_or_else(|| AppError::NaoEncontrado(format!("Pedido não encontrado: {id}")))
    }

    // Excluir um id inexistente não é erro
    pub fn excluir_pedido(&self, id: &str) {
        self.pedidos.remove(id);
    }

    pub fn listar_pendentes(&self) -> Vec<Pedido> {
        let mut pendentes = self
            .pedidos
            .list_by(|p| p.status == StatusPedido::Pendente);
        pendentes.sort_by(|a, b| a.id.cmp(&b.id));
        pendentes
    }

    pub fn avaliar(&self, id: &str, acao: Acao) -> Result<Pedido, AppError> {
        let pedido = self
            .pedidos
            .update(id, |pedido| pedido.status = acao.status())
            .ok_or_else(|| AppError::NaoEncontrado(format!("Pedido não encontrado: {id}")))?;
        tracing::info!("Pedido {} avaliado: {:?}", pedido.id, pedido.status);
        Ok(pedido)
    }

    pub fn listar_veiculos(&self) -> Vec<Veiculo> {
        let mut veiculos = self.veiculos.list();
        veiculos.sort_by(|a, b| a.id.cmp(&b.id));
        veiculos
    }

    pub fn criar_veiculo(&self, dados: DadosVeiculo) -> Result<Veiculo, AppError> {
        inserir_com_id_livre(&self.veiculos, "CAR", |id| Veiculo {
            id,
            modelo: dados.modelo.clone().unwrap_or_else(|| "Modelo".into()),
            placa: dados.placa.clone().unwrap_or_else(|| "ABC1D23".into()),
            ano: dados.ano.unwrap_or(2024),
            cor: dados.cor.clone().unwrap_or_else(|| "Prata".into()),
            diaria: dados.diaria.unwrap_or(Decimal::from(100)),
        })
    }
}
