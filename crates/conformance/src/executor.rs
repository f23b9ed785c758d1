//! Operation dispatch.
//!
//! Each operation mutates the run's [`ExecutionContext`]: create records
//! the service-assigned identifier and the response, read and delete
//! resolve the target through the reference map, and assertions evaluate
//! against the most recent response.

use tracing::debug;

use helios_testscript::Operation;

use crate::assertions::Assertion;
use crate::client::TestClient;
use crate::context::ExecutionContext;
use crate::error::{Fault, OperationError};
use crate::fixtures::FixtureStore;

/// Dispatches a single operation against the target client.
pub struct OperationExecutor<'a> {
    fixtures: &'a FixtureStore,
    client: Option<&'a dyn TestClient>,
}

impl<'a> OperationExecutor<'a> {
    /// Creates an executor over the instance's resolved fixtures.
    ///
    /// With no client configured every operation is a no-op; this is the
    /// dry-run mode used to exercise scripts without a target.
    pub fn new(fixtures: &'a FixtureStore, client: Option<&'a dyn TestClient>) -> Self {
        OperationExecutor { fixtures, client }
    }

    /// Executes one operation, updating the context's reference map and
    /// last-response slot.
    pub fn execute(
        &self,
        operation: &Operation,
        ctx: &mut ExecutionContext,
    ) -> Result<(), OperationError> {
        let Some(client) = self.client else {
            debug!(?operation, "No target client configured, skipping operation");
            return Ok(());
        };

        match operation {
            Operation::Create { source } => {
                let payload = self
                    .fixtures
                    .payload(source)
                    .ok_or_else(|| Fault::UnknownFixture(source.clone()))?;

                debug!(fixture = %source, "Executing create");
                let response = client.create(payload).map_err(Fault::from)?;
                let id = response
                    .id
                    .clone()
                    .ok_or_else(|| Fault::MissingCreatedId(source.clone()))?;

                ctx.references.put(source.clone(), id);
                ctx.last_response = Some(response);
                Ok(())
            }
            Operation::Read { target } => {
                let (resource_type, id) = self.resolve_target(target, ctx)?;

                debug!(fixture = %target, resource_type = %resource_type, id = %id, "Executing read");
                let response = client.read(&resource_type, &id).map_err(Fault::from)?;

                ctx.last_response = Some(response);
                Ok(())
            }
            Operation::Delete { target } => {
                let (resource_type, id) = self.resolve_target(target, ctx)?;

                debug!(fixture = %target, resource_type = %resource_type, id = %id, "Executing delete");
                let response = client.delete(&resource_type, &id).map_err(Fault::from)?;

                ctx.last_response = Some(response);
                ctx.references.remove(target);
                Ok(())
            }
            Operation::Assertion { parameter } => {
                debug!(parameter = %parameter, "Evaluating assertion");
                let assertion = Assertion::parse(parameter)?;
                assertion.evaluate(ctx.last_response.as_ref())
            }
        }
    }

    /// Looks up the target fixture's declared resource kind and its
    /// service-assigned identifier.
    fn resolve_target(
        &self,
        target: &str,
        ctx: &ExecutionContext,
    ) -> Result<(String, String), Fault> {
        let resource_type = self
            .fixtures
            .resource_type(target)
            .ok_or_else(|| Fault::UnknownFixture(target.to_string()))?
            .to_string();

        let id = ctx
            .references
            .get(target)
            .ok_or_else(|| Fault::UnresolvedReference(target.to_string()))?
            .to_string();

        Ok((resource_type, id))
    }
}
