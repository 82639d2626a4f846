//! # Redis
//!
//! Document store for every form the site accepts.
//!
//! ## Collections
//!
//! - `contact_messages`: list of JSON documents, appended with `RPUSH`
//! - `subscriptions`: hash of email to JSON document, written with `HSETNX` so a
//!   repeated email is a no-op
//! - `survey_responses`: hash of TRN to JSON document
//! - `survey_responses:emails`, `survey_responses:mobiles`: hashes of identity to
//!   TRN, the uniqueness index for survey submitters
//! - `survey_responses:trn`: serial of the last issued TRN
//!
//! ## Atomicity
//!
//! Redis runs a script without interleaving other commands, so both survey
//! scripts below are atomic:
//! - TRN reservation seeds the serial to the fallback on first use, then increments
//! - Survey insert claims the email and mobile number and stores the document,
//!   or writes nothing if either is already claimed
use std::time::Duration;

use async_trait::async_trait;
use redis::{
    AsyncCommands, Client, RedisResult, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::{
    error::StoreError,
    models::{ContactMessage, Subscription, SurveyResponse},
    store::Store,
    survey::trn::{FALLBACK_TRN, Trn},
};

pub const CONTACT_MESSAGES: &str = "contact_messages";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const SURVEY_RESPONSES: &str = "survey_responses";
pub const SURVEY_EMAILS: &str = "survey_responses:emails";
pub const SURVEY_MOBILES: &str = "survey_responses:mobiles";
pub const SURVEY_TRN: &str = "survey_responses:trn";

const NEXT_TRN_SCRIPT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    redis.call('SET', KEYS[1], ARGV[1])
    return tonumber(ARGV[1])
end
return redis.call('INCR', KEYS[1])
";

const INSERT_SURVEY_SCRIPT: &str = r"
if redis.call('HEXISTS', KEYS[1], ARGV[1]) == 1 or redis.call('HEXISTS', KEYS[2], ARGV[2]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1], ARGV[1], ARGV[3])
redis.call('HSET', KEYS[2], ARGV[2], ARGV[3])
redis.call('HSET', KEYS[3], ARGV[3], ARGV[4])
return 1
";

pub async fn init_redis(redis_url: &str) -> RedisResult<ConnectionManager> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;
    client.get_connection_manager_with_config(config).await
}

/// Collection keys, optionally under a shared prefix.
struct Keys {
    contact_messages: String,
    subscriptions: String,
    survey_responses: String,
    survey_emails: String,
    survey_mobiles: String,
    survey_trn: String,
}

impl Keys {
    fn new(prefix: &str) -> Self {
        Self {
            contact_messages: format!("{prefix}{CONTACT_MESSAGES}"),
            subscriptions: format!("{prefix}{SUBSCRIPTIONS}"),
            survey_responses: format!("{prefix}{SURVEY_RESPONSES}"),
            survey_emails: format!("{prefix}{SURVEY_EMAILS}"),
            survey_mobiles: format!("{prefix}{SURVEY_MOBILES}"),
            survey_trn: format!("{prefix}{SURVEY_TRN}"),
        }
    }
}

pub struct RedisStore {
    connection: ConnectionManager,
    keys: Keys,
    next_trn: Script,
    insert_survey: Script,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self::namespaced(connection, "")
    }

    /// Store whose keys all start with `namespace`, e.g. `portal:`.
    pub fn namespaced(connection: ConnectionManager, namespace: &str) -> Self {
        Self {
            connection,
            keys: Keys::new(namespace),
            next_trn: Script::new(NEXT_TRN_SCRIPT),
            insert_survey: Script::new(INSERT_SURVEY_SCRIPT),
        }
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn survey_identity_exists(
        &self,
        email: Option<&str>,
        mobile: Option<&str>,
    ) -> Result<bool, StoreError> {
        if email.is_none() && mobile.is_none() {
            return Ok(false);
        }

        let mut pipe = redis::pipe();
        if let Some(email) = email {
            pipe.hexists(&self.keys.survey_emails, email);
        }
        if let Some(mobile) = mobile {
            pipe.hexists(&self.keys.survey_mobiles, mobile);
        }

        let mut connection = self.connection.clone();
        let hits: Vec<bool> = pipe.query_async(&mut connection).await?;

        Ok(hits.into_iter().any(|hit| hit))
    }

    async fn next_trn(&self) -> Result<Trn, StoreError> {
        let mut connection = self.connection.clone();
        let serial: u32 = self
            .next_trn
            .key(&self.keys.survey_trn)
            .arg(FALLBACK_TRN.serial())
            .invoke_async(&mut connection)
            .await?;

        Ok(Trn::new(serial))
    }

    async fn insert_survey(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        let document = serde_json::to_string(response)?;

        let mut connection = self.connection.clone();
        let inserted: i32 = self
            .insert_survey
            .key(&self.keys.survey_emails)
            .key(&self.keys.survey_mobiles)
            .key(&self.keys.survey_responses)
            .arg(&response.email_id)
            .arg(&response.mobile_number)
            .arg(&response.trn)
            .arg(document)
            .invoke_async(&mut connection)
            .await?;

        match inserted {
            1 => Ok(()),
            _ => Err(StoreError::DuplicateIdentity),
        }
    }

    async fn insert_contact(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let document = serde_json::to_string(message)?;

        let mut connection = self.connection.clone();
        let _: i64 = connection.rpush(&self.keys.contact_messages, document).await?;

        Ok(())
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<bool, StoreError> {
        let document = serde_json::to_string(subscription)?;

        let mut connection = self.connection.clone();
        let inserted: bool = connection
            .hset_nx(&self.keys.subscriptions, &subscription.email, document)
            .await?;

        Ok(inserted)
    }
}
