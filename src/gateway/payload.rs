use serde::{Deserialize, Serialize};

use crate::bank::{ExampleEntry, find_example};
use crate::gateway::error::GatewayError;
use crate::grading::{GradeRequest, GradingError};
use crate::similarity::SimilarityMethod;

/// Body of `POST /v1/grade`.
///
/// Either `reference` and `candidate` are given, or `example` names a bank entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradePayload {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub candidate: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    /// Method name, parsed case-insensitively.
    #[serde(default)]
    pub method: Option<String>,
    /// Embedding model id; ignored for lexical methods.
    #[serde(default)]
    pub model: Option<String>,
}

impl GradePayload {
    /// Resolves the payload into a request, filling in `default_method`.
    pub fn into_request(self, default_method: SimilarityMethod) -> Result<GradeRequest, GatewayError> {
        let method = match self.method.as_deref() {
            Some(name) => name
                .parse::<SimilarityMethod>()
                .map_err(GradingError::from)?,
            None => default_method,
        };

        match (self.example, self.reference, self.candidate) {
            (Some(name), None, None) => {
                let entry = find_example(&name).ok_or(GatewayError::UnknownExample(name))?;
                Ok(entry.to_request(method))
            }
            (Some(_), _, _) => Err(GatewayError::InvalidRequest(
                "`example` cannot be combined with `reference` or `candidate`".to_string(),
            )),
            (None, Some(reference), Some(candidate)) => {
                let request = GradeRequest::new(reference, candidate, method);
                Ok(match self.question {
                    Some(question) => request.with_question(question),
                    None => request,
                })
            }
            (None, _, _) => Err(GatewayError::InvalidRequest(
                "both `reference` and `candidate` are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MethodInfo {
    pub name: &'static str,
    pub uses_embeddings: bool,
    pub is_distance: bool,
}

#[derive(Debug, Serialize)]
pub struct MethodsResponse {
    pub default: SimilarityMethod,
    pub methods: Vec<MethodInfo>,
    pub models: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub examples: &'static [ExampleEntry],
}
