// src/models/paginacao.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OrdemVantagem {
    #[default]
    Id,
    Descricao,
    CustoMoedas,
}

impl OrdemVantagem {
    // Nome da coluna; lista fechada, seguro para interpolar no SQL
    pub fn coluna(&self) -> &'static str {
        match self {
            OrdemVantagem::Id => "id",
            OrdemVantagem::Descricao => "descricao",
            OrdemVantagem::CustoMoedas => "custo_moedas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direcao {
    Asc,
    Desc,
}

impl Direcao {
    /// "desc" (qualquer caixa) é decrescente; qualquer outra coisa é crescente.
    pub fn parse(direcao: &str) -> Self {
        if direcao.eq_ignore_ascii_case("desc") {
            Direcao::Desc
        } else {
            Direcao::Asc
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Direcao::Asc => "ASC",
            Direcao::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginacao {
    pub page: u32,
    pub size: u32,
    pub ordem: OrdemVantagem,
    pub direcao: Direcao,
}

impl Paginacao {
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: i64,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total_items: i64, paginacao: &Paginacao) -> Self {
        let size = i64::from(paginacao.size.max(1));
        let total_pages = ((total_items + size - 1) / size) as u32;
        let pagination = PaginationMetadata {
            current_page: paginacao.page,
            total_pages,
            total_items,
            page_size: paginacao.size,
            has_next: paginacao.page.saturating_add(1) < total_pages,
            has_previous: paginacao.page > 0,
        };
        Self { items, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginacao(page: u32, size: u32) -> Paginacao {
        Paginacao { page, size, ordem: OrdemVantagem::Id, direcao: Direcao::Asc }
    }

    #[test]
    fn metadados_da_pagina_do_meio() {
        let page = PageResponse::new(vec![1, 2], 25, &paginacao(1, 10));
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_previous);
    }

    #[test]
    fn metadados_sem_itens() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 0, &paginacao(0, 10));
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_previous);
    }

    #[test]
    fn ultima_pagina_possivel_nao_tem_proxima() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 3, &paginacao(u32::MAX, 10));
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_previous);
    }

    #[test]
    fn direcao_desc_ignora_caixa() {
        assert_eq!(Direcao::parse("DESC"), Direcao::Desc);
        assert_eq!(Direcao::parse("qualquer"), Direcao::Asc);
    }
}
