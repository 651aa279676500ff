//! Runtime domain: expression evaluation and page-side function calls.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{ExceptionDetails, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Value of `expression` in the top-level document.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let params = json!({
            "expression": expression,
            "returnByValue": true,
            "awaitPromise": true,
        });
        let remote = self.runtime("Runtime.evaluate", params).await?;
        Ok(remote["value"].clone())
    }

    /// Like [`evaluate`](Self::evaluate) but keeps the result page-side.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let params = json!({ "expression": expression, "returnByValue": false });
        let remote = self.runtime("Runtime.evaluate", params).await?;
        Ok(serde_json::from_value(remote)?)
    }

    /// Run `function` with `this` bound to `object_id`, returning its value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: &[Value],
    ) -> Result<Value, CdpError> {
        let params = Self::call_params(object_id, function, args, true);
        let remote = self.runtime("Runtime.callFunctionOn", params).await?;
        Ok(remote["value"].clone())
    }

    /// Run `function` with `this` bound to `object_id`, returning a handle.
    pub async fn call_function_on_handle(
        &self,
        object_id: &str,
        function: &str,
        args: &[Value],
    ) -> Result<RemoteObject, CdpError> {
        let params = Self::call_params(object_id, function, args, false);
        let remote = self.runtime("Runtime.callFunctionOn", params).await?;
        Ok(serde_json::from_value(remote)?)
    }

    pub(super) fn call_params(object_id: &str, function: &str, args: &[Value], by_value: bool) -> Value {
        let arguments: Vec<Value> = args.iter().map(|v| json!({ "value": v })).collect();
        json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "arguments": arguments,
            "returnByValue": by_value,
            "awaitPromise": true,
        })
    }

    /// Issue a Runtime command and unwrap its `result` remote object,
    /// turning a thrown exception into [`CdpError::JavaScript`].
    async fn runtime(&self, method: &str, params: Value) -> Result<Value, CdpError> {
        let mut reply = self.call(method, Some(params)).await?;
        if let Some(raw) = reply.get("exceptionDetails") {
            return Err(CdpError::JavaScript(Self::exception_message(raw)));
        }
        Ok(reply.get_mut("result").map(Value::take).unwrap_or(Value::Null))
    }

    pub(super) fn exception_message(raw: &Value) -> String {
        serde_json::from_value::<ExceptionDetails>(raw.clone())
            .map(|d| d.message())
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}
