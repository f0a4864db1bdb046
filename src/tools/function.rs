//! Closure-backed tools with explicitly declared parameters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::schema::SchemaType;
use super::Tool;
use crate::error::ToolError;
use crate::types::tool::{FunctionDeclaration, ParamType, ParameterSchema, ParameterSpec};

type Handler = Box<dyn Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync>;

/// A tool made of a declaration and a Rust closure.
///
/// ```rust
/// use gemini_live_agent::tools::{FunctionTool, Tool};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Args {
///     a: i64,
///     b: Option<i64>,
/// }
///
/// let add = FunctionTool::builder("add")
///     .description("Adds two numbers.")
///     .param::<i64>("a")
///     .optional_param::<i64>("b")
///     .handler(|args: Args| Ok(args.a + args.b.unwrap_or(0)));
///
/// assert_eq!(add.declaration().required(), vec!["a"]);
/// ```
pub struct FunctionTool {
    declaration: FunctionDeclaration,
    handler: Handler,
}

impl FunctionTool {
    pub fn builder(name: impl Into<String>) -> FunctionToolBuilder {
        FunctionToolBuilder::new(name)
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn declaration(&self) -> &FunctionDeclaration {
        &self.declaration
    }

    fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        (self.handler)(args)
    }
}

/// Collects the name, description and parameter list of a tool.
#[derive(Debug, Clone)]
pub struct FunctionToolBuilder {
    name: String,
    description: Option<String>,
    params: Vec<ParameterSpec>,
}

impl FunctionToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Parameter without a default value.
    pub fn param<T: SchemaType + ?Sized>(self, name: impl Into<String>) -> Self {
        self.param_of_type(name, T::param_type(), true)
    }

    /// Parameter with a default value; the model may omit it.
    pub fn optional_param<T: SchemaType + ?Sized>(self, name: impl Into<String>) -> Self {
        self.param_of_type(name, T::param_type(), false)
    }

    pub fn param_of_type(
        mut self,
        name: impl Into<String>,
        param_type: ParamType,
        required: bool,
    ) -> Self {
        let name = name.into();
        let description = format!("Parameter {}", name);
        // Redeclaring a name replaces the earlier entry.
        self.params.retain(|p| p.name != name);
        self.params.push(ParameterSpec {
            name,
            param_type,
            description,
            required,
        });
        self
    }

    /// Synthesize the declaration from what has been declared so far.
    pub fn declaration(&self) -> FunctionDeclaration {
        FunctionDeclaration {
            name: self.name.clone(),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| format!("Executes the {} function.", self.name)),
            parameters: ParameterSchema {
                properties: self.params.clone(),
            },
        }
    }

    /// Finish with a typed handler. Arguments are decoded from the call's
    /// JSON object; decoding failures become [`ToolError::InvalidArguments`].
    pub fn handler<A, R, F>(self, f: F) -> FunctionTool
    where
        A: DeserializeOwned,
        R: Serialize,
        F: Fn(A) -> Result<R, ToolError> + Send + Sync + 'static,
    {
        self.raw_handler(move |args| {
            let typed: A = serde_json::from_value(Value::Object(args.clone()))
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
            let out = f(typed)?;
            serde_json::to_value(out).map_err(|e| ToolError::Execution(e.to_string()))
        })
    }

    /// Finish with a handler that receives the raw argument object.
    pub fn raw_handler<F>(self, f: F) -> FunctionTool
    where
        F: Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        FunctionTool {
            declaration: self.declaration(),
            handler: Box::new(f),
        }
    }
}
