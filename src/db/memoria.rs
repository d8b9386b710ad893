// src/db/memoria.rs
//
// Store em memória, usado quando não há DATABASE_URL e nos testes.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    common::error::AppError,
    db::store::{Store, UnitOfWork},
    models::{
        aluno::{Aluno, NovoAluno},
        cupom::{Cupom, NovoCupom},
        empresa::{EmpresaParceira, NovaEmpresa},
        instituicao::InstituicaoEnsino,
        paginacao::{Direcao, OrdemVantagem, Paginacao},
        professor::{NovoProfessor, Professor},
        transacao::{NovaTransacao, Transacao, TransacaoResponse},
        vantagem::{NovaVantagem, Vantagem},
    },
};

#[derive(Debug, Clone, Default)]
struct Dados {
    // Professores, alunos e empresas dividem a mesma sequência, como no banco
    ultimo_usuario_id: i64,
    ultima_instituicao_id: i64,
    ultima_vantagem_id: i64,
    ultimo_cupom_id: i64,
    ultima_transacao_id: i64,

    instituicoes: BTreeMap<i64, InstituicaoEnsino>,
    professores: BTreeMap<i64, Professor>,
    alunos: BTreeMap<i64, Aluno>,
    empresas: BTreeMap<i64, EmpresaParceira>,
    vantagens: BTreeMap<i64, Vantagem>,
    cupons: BTreeMap<i64, Cupom>,
    transacoes: BTreeMap<i64, Transacao>,
}

impl Dados {
    fn proximo_usuario_id(&mut self) -> i64 {
        self.ultimo_usuario_id += 1;
        self.ultimo_usuario_id
    }

    fn nome_usuario(&self, id: i64) -> Option<String> {
        self.professores
            .get(&id)
            .map(|p| p.nome.clone())
            .or_else(|| self.alunos.get(&id).map(|a| a.nome.clone()))
            .or_else(|| self.empresas.get(&id).map(|e| e.nome.clone()))
    }

    fn com_nomes(&self, t: &Transacao) -> TransacaoResponse {
        TransacaoResponse {
            id: t.id,
            usuario_id: t.usuario_id,
            usuario_nome: self.nome_usuario(t.usuario_id),
            usuario_destino_id: t.usuario_destino_id,
            usuario_destino_nome: t.usuario_destino_id.and_then(|id| self.nome_usuario(id)),
            data: t.data,
            valor: t.valor,
            tipo: t.tipo,
            motivo: t.motivo.clone(),
        }
    }

    // Espelha as constraints UNIQUE de 'professores'
    fn checar_unicidade_professor(
        &self,
        id: Option<i64>,
        email: &str,
        login: &str,
        documento: &str,
    ) -> Result<(), AppError> {
        for outro in self.professores.values().filter(|p| Some(p.id) != id) {
            if outro.email == email {
                return Err(AppError::Conflito(format!("Email já cadastrado: {email}")));
            }
            if outro.login == login {
                return Err(AppError::Conflito(format!("Login já cadastrado: {login}")));
            }
            if outro.documento == documento {
                return Err(AppError::Conflito(format!("Documento já cadastrado: {documento}")));
            }
        }
        Ok(())
    }
}

/// Todas as unidades de trabalho passam por um único mutex, então elas nunca
/// se intercalam. Cada unidade escreve numa cópia que só substitui o estado
/// compartilhado no `commit`.
#[derive(Clone, Default)]
pub struct MemoriaStore {
    dados: Arc<Mutex<Dados>>,
}

impl MemoriaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoriaStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, AppError> {
        let guard = self.dados.clone().lock_owned().await;
        let trabalho = (*guard).clone();
        Ok(Box::new(MemoriaUnitOfWork { guard, trabalho }))
    }
}

pub struct MemoriaUnitOfWork {
    guard: OwnedMutexGuard<Dados>,
    trabalho: Dados,
}

fn nao_existe(entidade: &str, id: i64) -> AppError {
    AppError::nao_encontrado(entidade, id)
}

#[async_trait]
impl UnitOfWork for MemoriaUnitOfWork {
    async fn insert_instituicao(&mut self, nome: &str) -> Result<InstituicaoEnsino, AppError> {
        let dados = &mut self.trabalho;
        dados.ultima_instituicao_id += 1;
        let instituicao = InstituicaoEnsino {
            id: dados.ultima_instituicao_id,
            nome: nome.to_string(),
        };
        dados.instituicoes.insert(instituicao.id, instituicao.clone());
        Ok(instituicao)
    }

    async fn find_instituicao(&mut self, id: i64) -> Result<Option<InstituicaoEnsino>, AppError> {
        Ok(self.trabalho.instituicoes.get(&id).cloned())
    }

    async fn list_instituicoes(&mut self) -> Result<Vec<InstituicaoEnsino>, AppError> {
        Ok(self.trabalho.instituicoes.values().cloned().collect())
    }

    async fn list_professores(&mut self) -> Result<Vec<Professor>, AppError> {
        Ok(self.trabalho.professores.values().cloned().collect())
    }

    async fn find_professor(&mut self, id: i64) -> Result<Option<Professor>, AppError> {
        Ok(self.trabalho.professores.get(&id).cloned())
    }

    // O mutex do store já garante exclusividade
    async fn find_professor_for_update(&mut self, id: i64) -> Result<Option<Professor>, AppError> {
        self.find_professor(id).await
    }

    async fn find_professor_by_email(&mut self, email: &str) -> Result<Option<Professor>, AppError> {
        Ok(self.trabalho.professores.values().find(|p| p.email == email).cloned())
    }

    async fn find_professor_by_login(&mut self, login: &str) -> Result<Option<Professor>, AppError> {
        Ok(self.trabalho.professores.values().find(|p| p.login == login).cloned())
    }

    async fn find_professor_by_documento(
        &mut self,
        documento: &str,
    ) -> Result<Option<Professor>, AppError> {
        Ok(self
            .trabalho
            .professores
            .values()
            .find(|p| p.documento == documento)
            .cloned())
    }

    async fn insert_professor(&mut self, novo: &NovoProfessor) -> Result<Professor, AppError> {
        let dados = &mut self.trabalho;
        dados.checar_unicidade_professor(None, &novo.email, &novo.login, &novo.documento)?;

        let professor = Professor {
            id: dados.proximo_usuario_id(),
            nome: novo.nome.clone(),
            documento: novo.documento.clone(),
            email: novo.email.clone(),
            login: novo.login.clone(),
            senha_hash: novo.senha_hash.clone(),
            departamento: novo.departamento.clone(),
            saldo_moedas: Decimal::ZERO,
            instituicao_id: Some(novo.instituicao_id),
        };
        dados.professores.insert(professor.id, professor.clone());
        Ok(professor)
    }

    async fn update_professor(&mut self, professor: &Professor) -> Result<Professor, AppError> {
        let dados = &mut self.trabalho;
        if !dados.professores.contains_key(&professor.id) {
            return Err(nao_existe("Professor", professor.id));
        }
        dados.checar_unicidade_professor(
            Some(professor.id),
            &professor.email,
            &professor.login,
            &professor.documento,
        )?;
        dados.professores.insert(professor.id, professor.clone());
        Ok(professor.clone())
    }

    async fn update_professor_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError> {
        let professor = self
            .trabalho
            .professores
            .get_mut(&id)
            .ok_or_else(|| nao_existe("Professor", id))?;
        professor.saldo_moedas = saldo;
        Ok(())
    }

    async fn delete_professor(&mut self, id: i64) -> Result<bool, AppError> {
        Ok(self.trabalho.professores.remove(&id).is_some())
    }

    async fn list_alunos(&mut self) -> Result<Vec<Aluno>, AppError> {
        Ok(self.trabalho.alunos.values().cloned().collect())
    }

    async fn find_aluno(&mut self, id: i64) -> Result<Option<Aluno>, AppError> {
        Ok(self.trabalho.alunos.get(&id).cloned())
    }

    async fn find_aluno_for_update(&mut self, id: i64) -> Result<Option<Aluno>, AppError> {
        self.find_aluno(id).await
    }

    async fn find_aluno_by_email(&mut self, email: &str) -> Result<Option<Aluno>, AppError> {
        Ok(self.trabalho.alunos.values().find(|a| a.email == email).cloned())
    }

    async fn insert_aluno(&mut self, novo: &NovoAluno) -> Result<Aluno, AppError> {
        let dados = &mut self.trabalho;
        if dados.alunos.values().any(|a| a.email == novo.email) {
            return Err(AppError::Conflito(format!("Email já cadastrado: {}", novo.email)));
        }
        let aluno = Aluno {
            id: dados.proximo_usuario_id(),
            nome: novo.nome.clone(),
            email: novo.email.clone(),
            saldo_moedas: Decimal::ZERO,
        };
        dados.alunos.insert(aluno.id, aluno.clone());
        Ok(aluno)
    }

    async fn update_aluno_saldo(&mut self, id: i64, saldo: Decimal) -> Result<(), AppError> {
        let aluno = self
            .trabalho
            .alunos
            .get_mut(&id)
            .ok_or_else(|| nao_existe("Aluno", id))?;
        aluno.saldo_moedas = saldo;
        Ok(())
    }

    async fn list_empresas(&mut self) -> Result<Vec<EmpresaParceira>, AppError> {
        Ok(self.trabalho.empresas.values().cloned().collect())
    }

    async fn find_empresa(&mut self, id: i64) -> Result<Option<EmpresaParceira>, AppError> {
        Ok(self.trabalho.empresas.get(&id).cloned())
    }

    async fn insert_empresa(&mut self, nova: &NovaEmpresa) -> Result<EmpresaParceira, AppError> {
        let dados = &mut self.trabalho;
        let empresa = EmpresaParceira {
            id: dados.proximo_usuario_id(),
            nome: nova.nome.clone(),
            nome_fantasia: nova.nome_fantasia.clone(),
            email: nova.email.clone(),
        };
        dados.empresas.insert(empresa.id, empresa.clone());
        Ok(empresa)
    }

    async fn list_vantagens(
        &mut self,
        empresa_id: Option<i64>,
        paginacao: &Paginacao,
    ) -> Result<(Vec<Vantagem>, i64), AppError> {
        let mut vantagens: Vec<Vantagem> = self
            .trabalho
            .vantagens
            .values()
            .filter(|v| empresa_id.is_none() || v.empresa_id == empresa_id)
            .cloned()
            .collect();
        let total = vantagens.len() as i64;

        vantagens.sort_by(|a, b| {
            let ordem = match paginacao.ordem {
                OrdemVantagem::Id => a.id.cmp(&b.id),
                OrdemVantagem::Descricao => a.descricao.cmp(&b.descricao),
                OrdemVantagem::CustoMoedas => a.custo_moedas.cmp(&b.custo_moedas),
            };
            let ordem = match paginacao.direcao {
                Direcao::Asc => ordem,
                Direcao::Desc => ordem.reverse(),
            };
            ordem.then(a.id.cmp(&b.id))
        });

        let pagina = vantagens
            .into_iter()
            .skip(paginacao.offset() as usize)
            .take(paginacao.size as usize)
            .collect();
        Ok((pagina, total))
    }

    async fn find_vantagem(&mut self, id: i64) -> Result<Option<Vantagem>, AppError> {
        Ok(self.trabalho.vantagens.get(&id).cloned())
    }

    async fn insert_vantagem(&mut self, nova: &NovaVantagem) -> Result<Vantagem, AppError> {
        let dados = &mut self.trabalho;
        dados.ultima_vantagem_id += 1;
        let vantagem = Vantagem {
            id: dados.ultima_vantagem_id,
            descricao: nova.descricao.clone(),
            foto: nova.foto.clone(),
            custo_moedas: nova.custo_moedas,
            empresa_id: nova.empresa_id,
        };
        dados.vantagens.insert(vantagem.id, vantagem.clone());
        Ok(vantagem)
    }

    async fn update_vantagem(&mut self, vantagem: &Vantagem) -> Result<Vantagem, AppError> {
        let atual = self
            .trabalho
            .vantagens
            .get_mut(&vantagem.id)
            .ok_or_else(|| nao_existe("Vantagem", vantagem.id))?;
        *atual = vantagem.clone();
        Ok(vantagem.clone())
    }

    async fn delete_vantagem(&mut self, id: i64) -> Result<bool, AppError> {
        Ok(self.trabalho.vantagens.remove(&id).is_some())
    }

    async fn insert_cupom(&mut self, novo: &NovoCupom) -> Result<Cupom, AppError> {
        let dados = &mut self.trabalho;
        if dados.cupons.values().any(|c| c.codigo == novo.codigo) {
            return Err(AppError::Conflito(format!(
                "Código de cupom já emitido: {}",
                novo.codigo
            )));
        }
        dados.ultimo_cupom_id += 1;
        let cupom = Cupom {
            id: dados.ultimo_cupom_id,
            codigo: novo.codigo.clone(),
            data_geracao: novo.data_geracao,
            data_vencimento: novo.data_vencimento,
            valido: true,
            utilizado: false,
            data_utilizacao: None,
            aluno_id: novo.aluno_id,
            vantagem_id: novo.vantagem_id,
            empresa_id: novo.empresa_id,
        };
        dados.cupons.insert(cupom.id, cupom.clone());
        Ok(cupom)
    }

    async fn find_cupom_by_codigo(&mut self, codigo: &str) -> Result<Option<Cupom>, AppError> {
        Ok(self.trabalho.cupons.values().find(|c| c.codigo == codigo).cloned())
    }

    async fn list_cupons_by_aluno(&mut self, aluno_id: i64) -> Result<Vec<Cupom>, AppError> {
        let mut cupons: Vec<Cupom> = self
            .trabalho
            .cupons
            .values()
            .filter(|c| c.aluno_id == aluno_id)
            .cloned()
            .collect();
        cupons.sort_by(|a, b| b.data_geracao.cmp(&a.data_geracao).then(b.id.cmp(&a.id)));
        Ok(cupons)
    }

    async fn marcar_cupom_utilizado(&mut self, cupom: &Cupom) -> Result<Cupom, AppError> {
        let atual = self
            .trabalho
            .cupons
            .get_mut(&cupom.id)
            .ok_or_else(|| nao_existe("Cupom", cupom.id))?;
        atual.utilizado = cupom.utilizado;
        atual.valido = cupom.valido;
        atual.data_utilizacao = cupom.data_utilizacao;
        Ok(atual.clone())
    }

    async fn insert_transacao(&mut self, nova: &NovaTransacao) -> Result<Transacao, AppError> {
        let dados = &mut self.trabalho;
        dados.ultima_transacao_id += 1;
        let transacao = Transacao {
            id: dados.ultima_transacao_id,
            usuario_id: nova.usuario_id,
            usuario_destino_id: nova.usuario_destino_id,
            data: nova.data,
            valor: nova.valor,
            tipo: nova.tipo,
            motivo: nova.motivo.clone(),
        };
        dados.transacoes.insert(transacao.id, transacao.clone());
        Ok(transacao)
    }

    async fn find_transacao(&mut self, id: i64) -> Result<Option<TransacaoResponse>, AppError> {
        Ok(self
            .trabalho
            .transacoes
            .get(&id)
            .map(|t| self.trabalho.com_nomes(t)))
    }

    async fn list_transacoes(&mut self) -> Result<Vec<TransacaoResponse>, AppError> {
        Ok(self
            .trabalho
            .transacoes
            .values()
            .map(|t| self.trabalho.com_nomes(t))
            .collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let MemoriaUnitOfWork { mut guard, trabalho } = *self;
        *guard = trabalho;
        Ok(())
    }
}
