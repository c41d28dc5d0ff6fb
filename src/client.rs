//! The Lursoft client: request execution plus the endpoint catalog.
//!
//! [`LursoftClient`] resolves a catalog path, attaches the current bearer token, sends
//! a GET against the configured base URL, and normalizes whatever comes back into a
//! [`LursoftResponse`]. Each catalog method is a pure mapping from typed arguments to
//! a `(path, parameter bag)` pair; the upstream wire keys (`code`, `regcode`, `id`,
//! `q`, `year`) are part of the API contract and must not be renamed.

// self
use crate::{
	_prelude::*,
	auth::{AuthConfig, TokenManager},
	cache::TokenCache,
	endpoint::{EndpointRequest, QueryParams},
	error::ConfigError,
	http::{HttpRequest, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	response::LursoftResponse,
};

/// Client for the Lursoft registry API.
///
/// The client holds no mutable state of its own; the only shared resource is the
/// token entry inside the injected cache, so a single instance can be called from any
/// number of tasks concurrently.
#[derive(Clone)]
pub struct LursoftClient {
	transport: Arc<dyn HttpTransport>,
	tokens: TokenManager,
	base_url: Url,
}
impl LursoftClient {
	/// Creates a client over the crate's default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn new(cache: Arc<dyn TokenCache>, config: AuthConfig) -> Result<Self, ConfigError> {
		let transport = Arc::new(crate::http::ReqwestTransport::new()?);

		Ok(Self::with_transport(cache, config, transport))
	}

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		cache: Arc<dyn TokenCache>,
		config: AuthConfig,
		transport: Arc<dyn HttpTransport>,
	) -> Self {
		let base_url = config.base_url.clone();
		let tokens = TokenManager::new(transport.clone(), cache, config);

		Self { transport, tokens, base_url }
	}

	/// Returns the token manager backing this client.
	pub fn tokens(&self) -> &TokenManager {
		&self.tokens
	}

	/// Executes one catalog operation: resolves the path, attaches the bearer token,
	/// sends the GET, and normalizes the response.
	///
	/// Caller-supplied `params` win over parameters embedded in the catalog path. HTTP
	/// error statuses (4xx/5xx) do not fail the call; they surface as non-success
	/// [`LursoftResponse`] values so callers can branch on
	/// [`status_code`](LursoftResponse::status_code) instead of on errors.
	pub async fn execute(&self, endpoint: &str, params: QueryParams) -> Result<LursoftResponse> {
		let request = EndpointRequest::parse(endpoint, params);
		let span = CallSpan::new(CallKind::Domain, &request.path);

		obs::record_call_outcome(CallKind::Domain, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallKind::Domain, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(CallKind::Domain, CallOutcome::Failure),
		}

		result
	}

	async fn dispatch(&self, request: EndpointRequest) -> Result<LursoftResponse> {
		let token = self.tokens.access_token().await?;
		let mut url = self.base_url.join(&request.path).map_err(|source| {
			ConfigError::InvalidEndpoint { path: request.path.clone(), source }
		})?;

		if !request.params.is_empty() {
			url.query_pairs_mut().extend_pairs(&request.params);
		}

		let raw = self.transport.send(HttpRequest::get(url).bearer(&token)).await?;
		let envelope = LursoftResponse::from_body(&raw.body, raw.status)?;

		Ok(envelope)
	}

	/// Searches Latvian legal entities; pass upstream keys such as `q` directly.
	pub async fn search_legal_entity(&self, params: QueryParams) -> Result<LursoftResponse> {
		self.execute("/search?r=search", params).await
	}

	/// Fetches the full report for a Latvian legal entity.
	pub async fn get_legal_entity_report(&self, reg_number: &str) -> Result<LursoftResponse> {
		self.execute("/company?r=company", single("code", reg_number)).await
	}

	/// Lists the annual reports filed by a legal entity.
	pub async fn get_annual_reports_list(&self, reg_number: &str) -> Result<LursoftResponse> {
		self.execute("/company?r=annual-reports", single("code", reg_number)).await
	}

	/// Fetches one annual report for a legal entity.
	pub async fn get_annual_report(
		&self,
		reg_number: &str,
		year: &str,
	) -> Result<LursoftResponse> {
		let mut params = single("code", reg_number);

		params.insert("year".into(), year.into());

		self.execute("/company?r=annual-report", params).await
	}

	/// Fetches a person's profile.
	pub async fn get_person_profile(&self, person_id: &str) -> Result<LursoftResponse> {
		self.execute("/person?r=profile", single("id", person_id)).await
	}

	/// Fetches the public report for a person.
	pub async fn get_public_person_report(&self, person_id: &str) -> Result<LursoftResponse> {
		self.execute("/person?r=report", single("id", person_id)).await
	}

	/// Fetches data on a deceased person.
	pub async fn get_deceased_person_data(&self, person_id: &str) -> Result<LursoftResponse> {
		self.execute("/person?r=deceased", single("id", person_id)).await
	}

	/// Searches the sanctions list.
	pub async fn search_sanctions_list(&self, params: QueryParams) -> Result<LursoftResponse> {
		self.execute("/sanctions?r=search", params).await
	}

	/// Fetches the sanctions report for a registered subject.
	pub async fn get_sanctions_report(&self, reg_number: &str) -> Result<LursoftResponse> {
		self.execute("/sanctions?r=report", single("code", reg_number)).await
	}

	/// Verifies whether a registration number appears on the sanctions list.
	pub async fn verify_sanction_by_reg_number(
		&self,
		reg_number: &str,
	) -> Result<LursoftResponse> {
		self.execute("/sanctions?r=verify", single("code", reg_number)).await
	}

	/// Searches Estonian legal entities by registry code.
	pub async fn search_estonian_legal_entity(
		&self,
		reg_number: &str,
	) -> Result<LursoftResponse> {
		self.execute("/estonia?r=search", single("regcode", reg_number)).await
	}

	/// Fetches the report for an Estonian legal entity.
	pub async fn get_estonian_legal_entity_report(
		&self,
		reg_number: &str,
	) -> Result<LursoftResponse> {
		self.execute("/estonia?r=company", single("regcode", reg_number)).await
	}

	/// Searches Lithuanian legal entities by registry code.
	pub async fn search_lithuanian_legal_entity(
		&self,
		reg_number: &str,
	) -> Result<LursoftResponse> {
		self.execute("/lithuania?r=search", single("regcode", reg_number)).await
	}

	/// Fetches the report for a Lithuanian legal entity.
	pub async fn get_lithuanian_legal_entity_report(
		&self,
		reg_number: &str,
	) -> Result<LursoftResponse> {
		self.execute("/lithuania?r=company", single("regcode", reg_number)).await
	}

	/// Searches Latvian addresses.
	pub async fn search_latvian_address(&self, params: QueryParams) -> Result<LursoftResponse> {
		self.execute("/address?r=search", params).await
	}

	/// Searches Lithuanian addresses.
	pub async fn search_lithuanian_address(
		&self,
		params: QueryParams,
	) -> Result<LursoftResponse> {
		self.execute("/address?r=search-lt", params).await
	}

	/// Searches Estonian addresses.
	pub async fn search_estonian_address(&self, params: QueryParams) -> Result<LursoftResponse> {
		self.execute("/address?r=search-ee", params).await
	}

	/// Fetches the CSDD statement for a vehicle.
	pub async fn get_csdd_vehicle_statement(&self, reg_number: &str) -> Result<LursoftResponse> {
		self.execute("/csdd?r=statement", single("code", reg_number)).await
	}

	/// Searches insolvency processes tied to a registered subject.
	pub async fn search_insolvency_process(&self, reg_number: &str) -> Result<LursoftResponse> {
		self.execute("/insolvency?r=search", single("code", reg_number)).await
	}

	/// Fetches data on one insolvency process.
	pub async fn get_insolvency_process_data(&self, process_id: &str) -> Result<LursoftResponse> {
		self.execute("/insolvency?r=process", single("id", process_id)).await
	}

	/// Fetches the report for one insolvency process.
	pub async fn get_insolvency_process_report(
		&self,
		process_id: &str,
	) -> Result<LursoftResponse> {
		self.execute("/insolvency?r=report", single("id", process_id)).await
	}
}
impl Debug for LursoftClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LursoftClient").field("base_url", &self.base_url.as_str()).finish()
	}
}

fn single(key: &str, value: &str) -> QueryParams {
	QueryParams::from([(key.to_owned(), value.to_owned())])
}
