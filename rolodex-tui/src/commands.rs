//! Requests the application asks the runtime to perform.
//!
//! `App` never talks to the network. Its update functions return a
//! [`Command`]; the runtime runs it with [`execute`] and feeds the
//! [`Outcome`] back through `App::apply`.

use rolodex_core::{Contact, ContactFields, ContactId};

use crate::api_client::{ApiClientError, RestClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchAll,
    Create(ContactFields),
    Update { id: ContactId, fields: ContactFields },
    Delete { id: ContactId },
}

#[derive(Debug)]
pub enum Outcome {
    Fetched(Result<Vec<Contact>, ApiClientError>),
    Created(Result<Contact, ApiClientError>),
    Updated {
        id: ContactId,
        result: Result<Contact, ApiClientError>,
    },
    Deleted {
        id: ContactId,
        result: Result<(), ApiClientError>,
    },
}

pub async fn execute(client: &RestClient, command: Command) -> Outcome {
    match command {
        Command::FetchAll => Outcome::Fetched(client.list_contacts().await),
        Command::Create(fields) => Outcome::Created(client.create_contact(&fields).await),
        Command::Update { id, fields } => Outcome::Updated {
            id,
            result: client.update_contact(id, &fields).await,
        },
        Command::Delete { id } => Outcome::Deleted {
            id,
            result: client.delete_contact(id).await.map(|_| ()),
        },
    }
}
