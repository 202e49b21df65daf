use crate::core::api_url::{build_api_url, parse_address};
use crate::core::envelope::{self, Pong, IP_INFO_ARR_PATH, IP_INFO_PATH};
use crate::core::errors::{Error, Result};
use crate::core::ip_info::{IpInfo, WriteRequest};
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::env;
use std::time::Duration;

/// Timeout (in seconds) applied to every API call unless configured otherwise.
pub const DEFAULT_TIMEOUT: u64 = 10;

const JSON_CONTENT_TYPE: &str = "application/json";

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ fetches one env record from the service at `address` using
/// the default client configuration.
///
/// ```no_run
/// let ip_info = foxip::get_ip_info("http://fox.local:8080", "prod").unwrap();
/// println!("{} allows {:?}", ip_info.env, ip_info.cidrs);
/// ```
pub fn get_ip_info(address: &str, id: &str) -> Result<IpInfo> {
    default_client(address)?.get_ip_info(id)
}

/// Fetch every env record tagged with `group`.
pub fn get_ip_info_group(address: &str, group: &str) -> Result<Vec<IpInfo>> {
    default_client(address)?.get_ip_info_group(group)
}

/// Fetch every env record.
pub fn get_ip_info_all(address: &str) -> Result<Vec<IpInfo>> {
    default_client(address)?.get_ip_info_all()
}

pub fn create_ip_info(address: &str, env: &str, groups: &[String], cidrs: &[String]) -> Result<()> {
    default_client(address)?.create_ip_info(env, groups, cidrs)
}

pub fn update_ip_info(address: &str, env: &str, groups: &[String], cidrs: &[String]) -> Result<()> {
    default_client(address)?.update_ip_info(env, groups, cidrs)
}

pub fn delete_ip_info(address: &str, env: &str) -> Result<()> {
    default_client(address)?.delete_ip_info(env)
}

fn default_client(address: &str) -> Result<Client> {
    ClientBuilder::default().address(address).build()
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct.
///
/// ```
/// let client = foxip::ClientBuilder::default()
///     .address("http://fox.local:8080")
///     .timeout(5)
///     .trace(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(client.address(), "http://fox.local:8080");
/// assert_eq!(client.timeout(), 5);
/// assert!(client.trace());
/// ```
///
/// The [ClientBuilder::new] method sources initial values from environment variables when set;
/// [ClientBuilder::default] ignores the environment.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    address: String,
    timeout: u64,
    trace: bool,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with no address, a 10 second timeout and tracing off.
    fn default() -> Self {
        Self {
            address: String::new(),
            timeout: DEFAULT_TIMEOUT,
            trace: false,
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when they are not.
    ///
    /// The environment variables used are:
    /// - `FOX_ADDRESS`
    /// - `FOX_TIMEOUT`
    /// - `FOX_TRACE`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            address: get_env_var("FOX_ADDRESS", default.address),
            timeout: get_env_var("FOX_TIMEOUT", default.timeout),
            trace: get_env_var("FOX_TRACE", default.trace),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the service base address, e.g. `http://fox.local:8080`.
    pub fn address<'s>(&'s mut self, address: &str) -> &'s mut Self {
        self.address = address.to_string();
        self
    }

    /// Set the per-call timeout in seconds; covers connect, send, receive and reading the body.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Log each request URL and the raw response (headers and body) at debug level.
    /// When off, requests are not logged at all.
    pub fn trace(&mut self, trace: bool) -> &mut Self {
        self.trace = trace;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client> {
        parse_address(&self.address)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()?;

        Ok(Client {
            address: self.address.clone(),
            timeout: self.timeout,
            trace: self.trace,
            http,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Raw result of one HTTP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Return the body when the status is exactly `200 OK`.
    pub fn require_ok(self) -> Result<Vec<u8>> {
        match self.status {
            200 => Ok(self.body),
            status => Err(Error::UnexpectedStatus(status)),
        }
    }
}

/// A blocking client for the Fox IP allowlist API. The configuration is fixed at build time;
/// clones share the underlying connection pool.
///
/// ```no_run
/// let client = foxip::ClientBuilder::new()
///     .address("http://fox.local:8080")
///     .build()
///     .unwrap();
///
/// client
///     .create_ip_info("dev", &["g1".to_string()], &["1.2.3.0/24".to_string()])
///     .unwrap();
/// let ip_info = client.get_ip_info("dev").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    address: String,
    timeout: u64,
    trace: bool,
    http: reqwest::blocking::Client,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Client {
    /// Build a client from environment variables; see [ClientBuilder::new].
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Per-call timeout in seconds. Defaults to 10.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn trace(&self) -> bool {
        self.trace
    }

    /*-------------------------------------------------------------------------
      Transport
    -------------------------------------------------------------------------*/

    /// Perform one HTTP call and return the status and the fully drained body.
    ///
    /// Non-2xx statuses are returned, not raised; only transport failures (connect, send,
    /// receive, timeout) are errors. The connection is released before returning.
    pub fn request(
        &self,
        method: Method,
        url: &str,
        timeout: u64,
        body: Option<Vec<u8>>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .timeout(Duration::from_secs(timeout));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        if self.trace {
            debug!("Request to {} {}", method, url);
        }

        let response = request.send().inspect_err(|error| {
            if self.trace {
                debug!("{} {}: FAILED: {}", method, url, error);
            }
        })?;
        let status = response.status().as_u16();
        if self.trace {
            debug!("Response status {}", status);
            debug!("Response headers {:?}", response.headers());
        }

        let body = response
            .bytes()
            .inspect_err(|error| {
                if self.trace {
                    debug!("{} {}: FAILED reading body: {}", method, url, error);
                }
            })?
            .to_vec();
        if self.trace {
            debug!("Response body {}", String::from_utf8_lossy(&body));
        }

        Ok(HttpResponse { status, body })
    }

    /// Build the absolute API URL for `sub_path`.
    pub fn api_url(&self, sub_path: &str) -> Result<String> {
        build_api_url(&self.address, sub_path)
    }

    /*-------------------------------------------------------------------------
      API Operations
    -------------------------------------------------------------------------*/

    /// `GET ping`; the response is not wrapped in an envelope.
    pub fn ping(&self) -> Result<Pong> {
        let body = self.get("ping")?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET ip-envs/{id}`, decoding `res.ipInfo`.
    pub fn get_ip_info(&self, id: &str) -> Result<IpInfo> {
        let body = self.get(&format!("ip-envs/{id}"))?;
        envelope::decode_one(&body, IP_INFO_PATH)
    }

    /// `GET ip-groups/{group}`, decoding `res.ipInfoArr`.
    pub fn get_ip_info_group(&self, group: &str) -> Result<Vec<IpInfo>> {
        let body = self.get(&format!("ip-groups/{group}"))?;
        envelope::decode_many(&body, IP_INFO_ARR_PATH)
    }

    /// `GET ip-all`, decoding `res.ipInfoArr`.
    pub fn get_ip_info_all(&self) -> Result<Vec<IpInfo>> {
        let body = self.get("ip-all")?;
        envelope::decode_many(&body, IP_INFO_ARR_PATH)
    }

    /// `POST ip-envs/{env}` with `{groupArr, cidrArr, managedBy: "tfc"}`.
    pub fn create_ip_info(&self, env: &str, groups: &[String], cidrs: &[String]) -> Result<()> {
        self.write(
            Method::POST,
            &format!("ip-envs/{env}"),
            &WriteRequest::create(groups, cidrs),
        )
    }

    /// `PUT ip-envs/{env}` with `{groupArr, cidrArr}`.
    pub fn update_ip_info(&self, env: &str, groups: &[String], cidrs: &[String]) -> Result<()> {
        self.write(
            Method::PUT,
            &format!("ip-envs/{env}"),
            &WriteRequest::update(groups, cidrs),
        )
    }

    /// `DELETE ip-envs/{env}`.
    pub fn delete_ip_info(&self, env: &str) -> Result<()> {
        let url = self.api_url(&format!("ip-envs/{env}"))?;
        self.request(Method::DELETE, &url, self.timeout, None, &[])?
            .require_ok()
            .map(|_| ())
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn get(&self, sub_path: &str) -> Result<Vec<u8>> {
        let url = self.api_url(sub_path)?;
        self.request(Method::GET, &url, self.timeout, None, &[])?
            .require_ok()
    }

    fn write(&self, method: Method, sub_path: &str, body: &WriteRequest) -> Result<()> {
        let url = self.api_url(sub_path)?;
        let body = serde_json::to_vec(body)?;
        self.request(
            method,
            &url,
            self.timeout,
            Some(body),
            &[(CONTENT_TYPE.as_str(), JSON_CONTENT_TYPE)],
        )?
        .require_ok()
        .map(|_| ())
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
