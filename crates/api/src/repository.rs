// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read access to stored responses.

use formflow_domain::Response;

/// The response store, as seen by report execution and response saving.
///
/// Implementations are read-only per call; persisting results is the
/// caller's concern.
pub trait ResponseRepository {
    /// Returns every response to a form, in storage order.
    fn responses_by_form(&self, form_id: &str) -> Vec<Response>;

    /// Returns the user's response to a form, if any.
    ///
    /// When the user has several, the most recently modified one.
    fn response_by_user_and_form(&self, user_id: &str, form_id: &str) -> Option<Response>;

    /// Returns the response with the given id, if stored.
    fn response_by_id(&self, response_id: &str) -> Option<Response>;
}

/// A response store held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryResponseRepository {
    responses: Vec<Response>,
}

impl InMemoryResponseRepository {
    /// Creates a repository over an existing collection.
    #[must_use]
    pub const fn new(responses: Vec<Response>) -> Self {
        Self { responses }
    }

    /// Inserts a response, replacing any stored response with the same id.
    pub fn upsert(&mut self, response: Response) {
        match self
            .responses
            .iter_mut()
            .find(|stored| stored.id == response.id)
        {
            Some(stored) => *stored = response,
            None => self.responses.push(response),
        }
    }

    /// Returns every stored response.
    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }
}

impl ResponseRepository for InMemoryResponseRepository {
    fn responses_by_form(&self, form_id: &str) -> Vec<Response> {
        self.responses
            .iter()
            .filter(|response| response.form_id == form_id)
            .cloned()
            .collect()
    }

    fn response_by_user_and_form(&self, user_id: &str, form_id: &str) -> Option<Response> {
        self.responses
            .iter()
            .filter(|response| response.user_id == user_id && response.form_id == form_id)
            .max_by_key(|response| response.last_modified_at)
            .cloned()
    }

    fn response_by_id(&self, response_id: &str) -> Option<Response> {
        self.responses
            .iter()
            .find(|response| response.id == response_id)
            .cloned()
    }
}
