use std::{fmt::Debug, future::Ready};

use gss_eip_core::helpers::pretty_type_name;
use kube::{
    runtime::{
        controller::{Action, Error as ControllerError},
        reflector::ObjectRef,
        watcher::Error as WatcherError,
    },
    Resource,
};
use log::{debug, error, warn};

type ControllerResult<T, E> = Result<(ObjectRef<T>, Action), ControllerError<E, WatcherError>>;

/// Logs one item of the controller stream, meant to be passed to `for_each`.
pub fn log_controller_result<T, E>(result: ControllerResult<T, E>) -> Ready<()>
where
    T: Resource,
    E: Debug,
{
    let kind = pretty_type_name::<T>();

    match result {
        Ok((object, action)) => {
            debug!("{kind} {} reconciled, {action:?}", object_path(&object))
        }
        Err(ControllerError::ReconcilerFailed(err, object)) => {
            warn!("{kind} {} failed to reconcile: {err:?}", object_path(&object))
        }
        Err(ControllerError::QueueError(err)) => error!("{kind} watch stream failed: {err:#?}"),
        Err(ControllerError::ObjectNotFound(object)) => {
            debug!("{kind} {} was removed before reconciling", object_path(&object))
        }
    }

    std::future::ready(())
}

fn object_path<T: Resource>(object: &ObjectRef<T>) -> String {
    match &object.namespace {
        Some(namespace) => format!("{namespace}/{}", object.name),
        None => object.name.clone(),
    }
}
