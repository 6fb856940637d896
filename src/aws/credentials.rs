//! Credential resolution for the CloudWatch Logs client.
//!
//! The task declares one of eight authentication methods; each method permits
//! only its own fields, and the field table is enforced when the method is
//! parsed out of the task, before any network call. Static methods read their
//! material exactly once at resolve time so environment or profile state is
//! never re-read mid-run; `instance` and `default` stay live because their
//! whole purpose is ongoing refresh.

use std::path::PathBuf;

use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use tracing::debug;

use crate::config::TaskConfig;
use crate::error::Error;

/// JVM-convention property names, read from the process environment by the
/// `properties` method.
const PROPERTY_ACCESS_KEY_ID: &str = "aws.accessKeyId";
const PROPERTY_SECRET_KEY: &str = "aws.secretKey";

/// Authentication method, parsed from the task with each variant carrying
/// only its legal fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationMethod {
    /// Static credential pair.
    Basic {
        access_key_id: String,
        secret_access_key: String,
    },
    /// Static session credential triple.
    Session {
        access_key_id: String,
        secret_access_key: String,
        session_token: String,
    },
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, read once at resolve
    /// time.
    Env,
    /// `aws.accessKeyId` / `aws.secretKey` process properties, read once at
    /// resolve time.
    Properties,
    /// Named profile in an optional custom profile file, loaded once at
    /// resolve time.
    Profile {
        profile_file: Option<PathBuf>,
        profile_name: String,
    },
    /// Instance metadata service, queried at each refresh.
    Instance,
    /// Fixed empty credentials; requests are not signed.
    Anonymous,
    /// The SDK's standard provider chain.
    Default,
}

/// Credential capability handed to the client builder.
#[derive(Debug, Clone)]
pub enum ResolvedCredentials {
    /// An explicit provider (static or live).
    Provider(SharedCredentialsProvider),
    /// Defer to the SDK's default provider chain.
    DefaultChain,
    /// Unsigned requests.
    Anonymous,
}

impl AuthenticationMethod {
    /// Apply the per-method field table to the task.
    ///
    /// A required field that is absent, or a field that is present but not
    /// permitted for the method, is a configuration error naming the field.
    pub fn from_task(task: &TaskConfig) -> Result<Self, Error> {
        match task.authentication_method.as_str() {
            "basic" => {
                let access_key_id = required(
                    &task.aws_access_key_id,
                    "'aws_access_key_id', 'aws_secret_access_key'",
                )?;
                let secret_access_key =
                    required(&task.aws_secret_access_key, "'aws_secret_access_key'")?;
                forbidden(&task.aws_profile_file, "aws_profile_file")?;
                forbidden(&task.aws_profile_name, "aws_profile_name")?;
                Ok(AuthenticationMethod::Basic {
                    access_key_id,
                    secret_access_key,
                })
            }
            "session" => {
                let access_key_id = required(
                    &task.aws_access_key_id,
                    "'aws_access_key_id', 'aws_secret_access_key', 'aws_session_token'",
                )?;
                let secret_access_key = required(
                    &task.aws_secret_access_key,
                    "'aws_secret_access_key', 'aws_session_token'",
                )?;
                let session_token = required(&task.aws_session_token, "'aws_session_token'")?;
                forbidden(&task.aws_profile_file, "aws_profile_file")?;
                forbidden(&task.aws_profile_name, "aws_profile_name")?;
                Ok(AuthenticationMethod::Session {
                    access_key_id,
                    secret_access_key,
                    session_token,
                })
            }
            "env" => {
                forbid_key_and_profile_fields(task)?;
                Ok(AuthenticationMethod::Env)
            }
            "properties" => {
                forbid_key_and_profile_fields(task)?;
                Ok(AuthenticationMethod::Properties)
            }
            "profile" => {
                forbidden(&task.aws_access_key_id, "aws_access_key_id")?;
                forbidden(&task.aws_secret_access_key, "aws_secret_access_key")?;
                Ok(AuthenticationMethod::Profile {
                    profile_file: task.aws_profile_file.clone(),
                    profile_name: task
                        .aws_profile_name
                        .clone()
                        .unwrap_or_else(|| "default".to_string()),
                })
            }
            "instance" => {
                forbid_key_and_profile_fields(task)?;
                Ok(AuthenticationMethod::Instance)
            }
            "anonymous" => {
                forbid_key_and_profile_fields(task)?;
                Ok(AuthenticationMethod::Anonymous)
            }
            "default" => {
                forbid_key_and_profile_fields(task)?;
                Ok(AuthenticationMethod::Default)
            }
            other => Err(Error::config(format!(
                "Unknown authentication_method '{}'. Supported methods are basic, session, env, \
                 properties, profile, instance, anonymous, and default.",
                other
            ))),
        }
    }

    /// Build the credential capability for this method.
    ///
    /// Static methods read their material here, exactly once; every later
    /// `provide_credentials` call returns it unchanged.
    pub async fn resolve(&self) -> Result<ResolvedCredentials, Error> {
        match self {
            AuthenticationMethod::Basic {
                access_key_id,
                secret_access_key,
            } => Ok(static_provider(Credentials::from_keys(
                access_key_id,
                secret_access_key,
                None,
            ))),
            AuthenticationMethod::Session {
                access_key_id,
                secret_access_key,
                session_token,
            } => Ok(static_provider(Credentials::from_keys(
                access_key_id,
                secret_access_key,
                Some(session_token.clone()),
            ))),
            AuthenticationMethod::Env => {
                let provider =
                    aws_config::environment::EnvironmentVariableCredentialsProvider::new();
                let credentials = provider.provide_credentials().await.map_err(|err| {
                    Error::config(format!(
                        "unable to load credentials for authentication_method 'env': {}",
                        err
                    ))
                })?;
                debug!("resolved environment credentials once; provider is static from here");
                Ok(static_provider(credentials))
            }
            AuthenticationMethod::Properties => {
                let access_key_id = property(PROPERTY_ACCESS_KEY_ID)?;
                let secret_key = property(PROPERTY_SECRET_KEY)?;
                Ok(static_provider(Credentials::from_keys(
                    access_key_id,
                    secret_key,
                    None,
                )))
            }
            AuthenticationMethod::Profile {
                profile_file,
                profile_name,
            } => {
                let mut builder =
                    ProfileFileCredentialsProvider::builder().profile_name(profile_name.as_str());
                if let Some(file) = profile_file {
                    builder = builder.profile_files(
                        ProfileFiles::builder()
                            .with_file(ProfileFileKind::Credentials, file)
                            .build(),
                    );
                }
                let credentials = builder.build().provide_credentials().await.map_err(|err| {
                    Error::config(format!(
                        "unable to load credentials from profile '{}': {}",
                        profile_name, err
                    ))
                })?;
                debug!(
                    profile = %profile_name,
                    "resolved profile credentials once; provider is static from here"
                );
                Ok(static_provider(credentials))
            }
            AuthenticationMethod::Instance => Ok(ResolvedCredentials::Provider(
                SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build()),
            )),
            AuthenticationMethod::Anonymous => Ok(ResolvedCredentials::Anonymous),
            AuthenticationMethod::Default => Ok(ResolvedCredentials::DefaultChain),
        }
    }
}

fn static_provider(credentials: Credentials) -> ResolvedCredentials {
    // Credentials provide themselves, unchanged, on every call.
    ResolvedCredentials::Provider(SharedCredentialsProvider::new(credentials))
}

fn required(value: &Option<String>, names: &str) -> Result<String, Error> {
    value
        .clone()
        .ok_or_else(|| Error::config(format!("Required option is not set: {}", names)))
}

fn forbidden<T>(value: &Option<T>, name: &str) -> Result<(), Error> {
    if value.is_some() {
        return Err(Error::config(format!("Invalid option is set: '{}'", name)));
    }
    Ok(())
}

fn forbid_key_and_profile_fields(task: &TaskConfig) -> Result<(), Error> {
    forbidden(&task.aws_access_key_id, "aws_access_key_id")?;
    forbidden(&task.aws_secret_access_key, "aws_secret_access_key")?;
    forbidden(&task.aws_profile_file, "aws_profile_file")?;
    forbidden(&task.aws_profile_name, "aws_profile_name")?;
    Ok(())
}

fn property(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| {
        Error::config(format!(
            "unable to load credentials for authentication_method 'properties': {} is not set",
            name
        ))
    })
}
