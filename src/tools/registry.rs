use std::sync::Arc;

use serde_json::Value;

use crate::{
    builder::{FunctionBuilder, ParamBuilder},
    chat::Tool,
    observer::{self, SharedObserver, TraceEvent},
};

use super::{
    definition::{TextTool, ToolDescriptor},
    error::ToolError,
};

const QUERY_PARAM: &str = "query";

/// Ordered, immutable set of tools.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn TextTool>>,
    observer: SharedObserver,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn TextTool>>) -> Self {
        Self {
            tools,
            observer: observer::noop(),
        }
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn get_tools(&self) -> &[Arc<dyn TextTool>] {
        &self.tools
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|tool| tool.descriptor()).collect()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.descriptor().name).collect()
    }

    /// Function-calling schemas, one required string `query` each.
    pub fn function_specs(&self) -> Vec<Tool> {
        self.descriptors()
            .into_iter()
            .map(|descriptor| {
                FunctionBuilder::new(descriptor.name)
                    .description(descriptor.description)
                    .param(
                        ParamBuilder::new(QUERY_PARAM)
                            .type_of("string")
                            .description("The search query"),
                    )
                    .required(vec![QUERY_PARAM.to_string()])
                    .build()
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args_json: &str) -> Result<String, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.descriptor().name == name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        let query = parse_query(args_json)?;

        log::debug!("Invoking tool {name} with query {query:?}");
        let result = tool.call(&query).await;
        self.observer.on_event(&TraceEvent::ToolInvoked {
            name: name.to_string(),
            ok: result.is_ok(),
        });
        result
    }
}

fn parse_query(raw: &str) -> Result<String, ToolError> {
    let args: Value =
        serde_json::from_str(raw).map_err(|err| ToolError::InvalidArgs(err.to_string()))?;
    match args {
        Value::String(query) => Ok(query),
        Value::Object(map) => map
            .get(QUERY_PARAM)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ToolError::InvalidArgs(format!("missing string `{QUERY_PARAM}`"))),
        other => Err(ToolError::InvalidArgs(format!(
            "expected an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingObserver;
    use async_trait::async_trait;

    struct Echo(&'static str);

    #[async_trait]
    impl TextTool for Echo {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor::new(self.0, format!("{} tool", self.0))
        }

        async fn call(&self, query: &str) -> Result<String, ToolError> {
            if query.is_empty() {
                return Err(ToolError::Execution("empty query".into()));
            }
            Ok(format!("{}:{query}", self.0))
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new(vec![Arc::new(Echo("web")), Arc::new(Echo("site"))])
    }

    #[test]
    fn tools_keep_registration_order() {
        assert_eq!(registry().tool_names(), vec!["web", "site"]);
        let specs = registry().function_specs();
        assert_eq!(specs[1].function.name, "site");
        assert_eq!(specs[1].function.parameters["required"], serde_json::json!(["query"]));
    }

    #[tokio::test]
    async fn execute_dispatches_by_name() {
        let observer = Arc::new(RecordingObserver::default());
        let registry = registry().with_observer(observer.clone());

        let out = registry
            .execute("site", r#"{"query":"opening hours"}"#)
            .await
            .unwrap();

        assert_eq!(out, "site:opening hours");
        assert_eq!(
            observer.events(),
            vec![TraceEvent::ToolInvoked {
                name: "site".into(),
                ok: true
            }]
        );
    }

    #[tokio::test]
    async fn execute_reports_bad_calls() {
        let registry = registry();
        assert_eq!(
            registry.execute("maps", "{}").await,
            Err(ToolError::NotFound("maps".into()))
        );
        assert!(matches!(
            registry.execute("web", r#"{"q":1}"#).await,
            Err(ToolError::InvalidArgs(_))
        ));
        assert!(matches!(
            registry.execute("web", r#"{"query":""}"#).await,
            Err(ToolError::Execution(_))
        ));
        assert_eq!(registry.execute("web", r#""plain""#).await.unwrap(), "web:plain");
    }
}
