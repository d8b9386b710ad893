// src/db/memory_store.rs
//
// Mapa concorrente por id, usado pela locadora (pedidos e veículos).

use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// Insere só se o id ainda não existir. Retorna `false` em caso de colisão.
    pub fn insert_new(&self, id: &str, value: T) -> bool {
        match self.data.entry(id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vaga) => {
                vaga.insert(value);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.data.get(id).map(|v| v.clone())
    }

    /// Aplica `f` ao valor guardado e devolve uma cópia do resultado.
    pub fn update<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        self.data.get_mut(id).map(|mut v| {
            f(v.value_mut());
            v.clone()
        })
    }

    pub fn remove(&self, id: &str) -> Option<T> {
        self.data.remove(id).map(|(_, v)| v)
    }

    pub fn list(&self) -> Vec<T> {
        self.data
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn list_by<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.data
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<T: Clone> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
