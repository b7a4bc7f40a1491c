//! Step history recorded while resolving a uri

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::types::UriPackageOrWrapper;
use crate::uri::Uri;

/// What a single resolution step produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StepOutcome {
    Uri(Uri),
    Package(Uri),
    Wrapper(Uri),
    Error(String),
}

impl StepOutcome {
    pub fn from_result(result: &Result<UriPackageOrWrapper>) -> Self {
        match result {
            Ok(UriPackageOrWrapper::Uri(uri)) => StepOutcome::Uri(uri.clone()),
            Ok(UriPackageOrWrapper::Package(uri, _)) => StepOutcome::Package(uri.clone()),
            Ok(UriPackageOrWrapper::Wrapper(uri, _)) => StepOutcome::Wrapper(uri.clone()),
            // resolution errors carry their own history; keep only the headline
            Err(e) => StepOutcome::Error(e.to_string().lines().next().unwrap_or_default().to_string()),
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        match self {
            StepOutcome::Uri(uri) | StepOutcome::Package(uri) | StepOutcome::Wrapper(uri) => Some(uri),
            StepOutcome::Error(_) => None,
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Uri(uri) => write!(f, "uri ({uri})"),
            StepOutcome::Package(uri) => write!(f, "package ({uri})"),
            StepOutcome::Wrapper(uri) => write!(f, "wrapper ({uri})"),
            StepOutcome::Error(message) => write!(f, "error ({message})"),
        }
    }
}

/// One attempt made by a resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionStep {
    pub source_uri: Uri,
    pub outcome: StepOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_history: Vec<ResolutionStep>,
}

impl ResolutionStep {
    pub fn new(source_uri: Uri, result: &Result<UriPackageOrWrapper>) -> Self {
        Self {
            source_uri,
            outcome: StepOutcome::from_result(result),
            description: None,
            sub_history: Vec::new(),
        }
    }

    pub fn with_outcome(source_uri: Uri, outcome: StepOutcome) -> Self {
        Self {
            source_uri,
            outcome,
            description: None,
            sub_history: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sub_history(mut self, sub_history: Vec<ResolutionStep>) -> Self {
        self.sub_history = sub_history;
        self
    }

    fn write_clean(&self, f: &mut fmt::Formatter<'_>, depth: usize, first: &mut bool) -> fmt::Result {
        if !*first {
            writeln!(f)?;
        }
        *first = false;

        write!(f, "{}{}", "  ".repeat(depth), self.source_uri)?;
        if let Some(description) = &self.description {
            write!(f, " => {description}")?;
        }
        write!(f, " => {}", self.outcome)?;

        for step in &self.sub_history {
            step.write_clean(f, depth + 1, first)?;
        }
        Ok(())
    }
}

/// Ordered record of every attempt, in call order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolutionHistory(Vec<ResolutionStep>);

impl ResolutionHistory {
    pub fn new(steps: Vec<ResolutionStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[ResolutionStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Source uri of every step, nested steps included, depth first
    pub fn sources(&self) -> Vec<&Uri> {
        fn collect<'a>(steps: &'a [ResolutionStep], out: &mut Vec<&'a Uri>) {
            for step in steps {
                out.push(&step.source_uri);
                collect(&step.sub_history, out);
            }
        }

        let mut out = Vec::new();
        collect(&self.0, &mut out);
        out
    }
}

impl From<Vec<ResolutionStep>> for ResolutionHistory {
    fn from(steps: Vec<ResolutionStep>) -> Self {
        Self(steps)
    }
}

/// Renders the clean, indented resolution stack
impl fmt::Display for ResolutionHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(empty)");
        }
        let mut first = true;
        for step in &self.0 {
            step.write_clean(f, 0, &mut first)?;
        }
        Ok(())
    }
}
