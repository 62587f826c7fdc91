// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Deserialize;

use crate::api::{ApiGateway, Origin};
use crate::error::ApiError;
use crate::models::{Category, CategoryPatch, NewCategory, TxType};
use crate::store::{Session, non_fatal};

#[derive(Debug, Deserialize)]
struct CategoryList {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct CategoryEnvelope {
    category: Category,
}

#[derive(Debug)]
pub enum CategoryEvent {
    Fetched(Vec<Category>),
    FetchedOne(Category),
    Created(Category),
    Updated(Category),
    Deleted(String),
    Failed(String),
}

/// Local cache of the category collection, partitioned by type for the
/// income/expense pickers. The partitions are derived state and recomputed
/// whenever the collection changes; a failed fetch leaves both untouched.
#[derive(Debug, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
    income_categories: Vec<Category>,
    expense_categories: Vec<Category>,
    current: Option<Category>,
    error: Option<String>,
}

impl CategoryStore {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn income_categories(&self) -> &[Category] {
        &self.income_categories
    }

    pub fn expense_categories(&self) -> &[Category] {
        &self.expense_categories
    }

    pub fn current(&self) -> Option<&Category> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn apply(&mut self, event: CategoryEvent) {
        match event {
            CategoryEvent::Fetched(categories) => {
                self.error = None;
                self.categories = categories;
                self.repartition();
            }
            CategoryEvent::FetchedOne(category) => {
                self.error = None;
                self.current = Some(category);
            }
            CategoryEvent::Created(category) => {
                self.error = None;
                match category.r#type {
                    TxType::Income => self.income_categories.push(category.clone()),
                    TxType::Expense => self.expense_categories.push(category.clone()),
                }
                self.categories.push(category);
            }
            CategoryEvent::Updated(category) => {
                self.error = None;
                if let Some(slot) = self.categories.iter_mut().find(|c| c.id == category.id) {
                    *slot = category;
                    self.repartition();
                }
            }
            CategoryEvent::Deleted(id) => {
                self.error = None;
                self.categories.retain(|c| c.id != id);
                self.repartition();
            }
            CategoryEvent::Failed(message) => {
                self.error = Some(message);
            }
        }
    }

    fn repartition(&mut self) {
        self.income_categories = self
            .categories
            .iter()
            .filter(|c| c.r#type == TxType::Income)
            .cloned()
            .collect();
        self.expense_categories = self
            .categories
            .iter()
            .filter(|c| c.r#type == TxType::Expense)
            .cloned()
            .collect();
    }

    /// System categories are server-seeded and read-only from here.
    fn guard_mutable(&self, id: &str) -> Result<(), ApiError> {
        if self.categories.iter().any(|c| c.id == id && c.is_system) {
            return Err(ApiError::Validation(
                "System categories cannot be modified".into(),
            ));
        }
        Ok(())
    }

    pub fn fetch_all(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        r#type: Option<TxType>,
    ) -> Result<(), ApiError> {
        let mut query = Vec::new();
        if let Some(t) = r#type {
            query.push(("type", t.to_string()));
        }
        match gw.get::<CategoryList>(Origin::Core, "/api/v1/categories", &query, session) {
            Ok(list) => self.apply(CategoryEvent::Fetched(list.categories)),
            Err(e) => self.apply(CategoryEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn fetch_one(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/api/v1/categories/{}", id);
        match gw.get::<CategoryEnvelope>(Origin::Core, &path, &[], session) {
            Ok(env) => self.apply(CategoryEvent::FetchedOne(env.category)),
            Err(e) => self.apply(CategoryEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn create(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        input: &NewCategory,
    ) -> Result<(), ApiError> {
        input.validate()?;
        match gw.post::<_, CategoryEnvelope>(Origin::Core, "/api/v1/categories", input, session) {
            Ok(env) => self.apply(CategoryEvent::Created(env.category)),
            Err(e) => self.apply(CategoryEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn update(
        &mut self,
        gw: &ApiGateway,
        session: &Session,
        id: &str,
        input: &CategoryPatch,
    ) -> Result<(), ApiError> {
        self.guard_mutable(id)?;
        input.validate()?;
        let path = format!("/api/v1/categories/{}", id);
        match gw.put::<_, CategoryEnvelope>(Origin::Core, &path, input, session) {
            Ok(env) => self.apply(CategoryEvent::Updated(env.category)),
            Err(e) => self.apply(CategoryEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }

    pub fn delete(&mut self, gw: &ApiGateway, session: &Session, id: &str) -> Result<(), ApiError> {
        self.guard_mutable(id)?;
        let path = format!("/api/v1/categories/{}", id);
        match gw.delete(Origin::Core, &path, session) {
            Ok(()) => self.apply(CategoryEvent::Deleted(id.to_string())),
            Err(e) => self.apply(CategoryEvent::Failed(non_fatal(e)?)),
        }
        Ok(())
    }
}
