use std::sync::Arc;

use tracing::debug;

use super::repository::CepRepository;
use crate::controller::{Controller, ControllerExt};
use crate::http::{HttpRequest, HttpResponse, HttpStatus};
use crate::json::{JsonCodec, SerdeJsonCodec};

pub const NOT_FOUND_MESSAGE: &str = "CEP não encontrado";

/// Answers `GET /cep/<cep>` from a [`CepRepository`].
///
/// Every other method keeps the default `501 Not Implemented`.
pub struct CepController {
    repository: Arc<CepRepository>,
    codec: SerdeJsonCodec,
}

impl CepController {
    #[must_use]
    pub fn new(repository: Arc<CepRepository>, codec: SerdeJsonCodec) -> Self {
        Self { repository, codec }
    }

    /// The CEP segment of `path`: everything after `/cep/`, or after `/cep`
    /// when no slash follows.
    fn cep_from_path(path: &str) -> &str {
        path.strip_prefix("/cep/")
            .or_else(|| path.strip_prefix("/cep"))
            .unwrap_or(path)
    }
}

impl Controller for CepController {
    fn codec(&self) -> &dyn JsonCodec {
        &self.codec
    }

    fn handle_get(&self, request: &HttpRequest) -> HttpResponse {
        let cep = Self::cep_from_path(request.path());
        if cep.is_empty() {
            return self.build_error_message(NOT_FOUND_MESSAGE, HttpStatus::NotFound);
        }
        let Some(address) = self.repository.find_by_cep(cep) else {
            debug!(cep, "CEP not found");
            return self.build_error_message(NOT_FOUND_MESSAGE, HttpStatus::NotFound);
        };
        match self.serialize_to_text(address) {
            Some(body) => HttpResponse::new(body, HttpStatus::Ok),
            None => self.build_error(HttpStatus::InternalServerError),
        }
    }
}
