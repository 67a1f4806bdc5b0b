//! gcpdocs - Google Cloud documentation tools for AI agents
//!
//! This crate fetches public Google Cloud documentation pages, strips the
//! site chrome and renders the remaining body as compact markdown. Free-text
//! queries are resolved to candidate pages and ranked before the best ones
//! are fetched.
//!
//! ## Tools
//!
//! [`Tool`] dispatches the four tools exposed over MCP:
//! - `fetch_google_cloud_doc` - one page by documentation path
//! - `search_google_cloud_docs` - ranked search with content of the top results
//! - `list_google_cloud_products` - the product catalog
//! - `get_api_reference` - REST API reference per service
//!
//! ## Search Providers
//!
//! Live probes implement [`SearchProvider`]; the first one that returns
//! results wins and the keyword tables in [`catalog`] always contribute.
//! - [`WebSearchProvider`] - web search restricted to the docs site
//! - [`SiteSearchProvider`] - the docs site's own search page

pub mod catalog;
pub mod client;
mod error;
pub mod extract;
pub mod rank;
pub mod search;
mod tool;
mod types;

pub use client::{FetchOptions, FetchedPage, HttpPageFetcher, PageFetcher};
pub use error::{ExtractionError, FetchError, ToolError};
pub use extract::{extract, ExtractedPage, Extractor, Section};
pub use search::{
    CandidateResolver, SearchProvider, SearchProviders, SiteSearchProvider, WebSearchProvider,
};
pub use tool::{
    Tool, ToolBuilder, ToolDefinition, ToolOutput, API_REFERENCE_TOOL, FETCH_DOC_TOOL,
    LIST_PRODUCTS_TOOL, SEARCH_DOCS_TOOL,
};
pub use types::{
    ApiReferenceRequest, ApiReferenceResponse, Candidate, ErrorPayload, ExtractionResult,
    FetchDocRequest, ListProductsRequest, ProductEntry, ProductListResponse, SearchDocsRequest,
    SearchResponse, SearchResultEntry,
};

/// Default User-Agent string (desktop Chrome; the docs site serves full pages to it)
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Maximum characters of rendered content returned per page
pub const MAX_CONTENT_CHARS: usize = 20_000;

/// Description of `fetch_google_cloud_doc` for LLM consumption
pub const FETCH_DOC_DESCRIPTION: &str = r#"Fetch and extract content from a specific Google Cloud documentation page.

**WHEN TO USE**: Use this tool when you already know the exact documentation path you need, or when you want to get detailed content from a specific GCP documentation page.

**INPUT**: Documentation path after cloud.google.com/ (e.g., 'compute/docs/instances/create-start-instance', 'storage/docs/creating-buckets')

**OUTPUT**: Returns JSON with:
- title: Page title
- url: Full URL
- content: Markdown-formatted documentation content (max 20,000 chars)
- contentLength: Total content length
- truncated: Whether content was truncated

**COMMON PATHS**:
- Compute: compute/docs/instances/create-start-instance
- Storage: storage/docs/creating-buckets, storage/docs/encryption
- BigQuery: bigquery/docs/partitioned-tables, bigquery/docs/clustered-tables
- Cloud SQL: sql/docs/high-availability, sql/docs/replication
- GKE: kubernetes-engine/docs/how-to/cluster-autoscaler
- IAM: iam/docs/understanding-roles, iam/docs/service-accounts
- VPC: vpc/docs/vpc-peering, vpc/docs/shared-vpc
- Cloud Run: run/docs/configuring/environment-variables

**TIP**: If you don't know the exact path, use 'search_google_cloud_docs' first to find relevant documentation."#;

/// Description of `search_google_cloud_docs` for LLM consumption
pub const SEARCH_DOCS_DESCRIPTION: &str = r#"Search Google Cloud documentation with any free-form query. Returns relevant documentation with actual content.

**WHEN TO USE**: ALWAYS use this tool when the user asks about Google Cloud Platform (GCP) services, configurations, best practices, or how-to questions. This is the PRIMARY tool for GCP-related queries.

**TRIGGERS** - Use this tool when user asks about:
- Any GCP service (Compute Engine, Cloud Storage, BigQuery, Cloud SQL, GKE, Cloud Run, IAM, VPC, etc.)
- Configuration questions ("how to configure...", "how to setup...")
- Best practices for GCP services
- Troubleshooting GCP issues
- Cross-project or cross-account scenarios
- Security, encryption, permissions in GCP
- Networking in GCP (VPC, peering, firewall, load balancer)
- Database configurations (Cloud SQL HA, replicas, backups)
- Container orchestration (GKE autoscaling, node pools)
- Serverless (Cloud Run, Cloud Functions environment variables)

**INPUT**:
- query (required): Free-form search query in natural language
- product (optional): Filter by specific GCP product

**EXAMPLE QUERIES**:
- "how to share encrypted bucket cross account"
- "vpc peering between two projects"
- "cloud sql high availability setup"
- "gke autoscaling configuration"
- "bigquery partition table"
- "cloud run environment variables"
- "iam service account impersonation"
- "cloud storage cmek encryption"
- "gke workload identity"

**OUTPUT**: Returns JSON with:
- query: Original search query
- totalResults: Number of results found
- results: Array of top 3 docs with full content (title, url, content)
- otherRelatedDocs: Additional related documentation URLs

**SUPPORTED TOPICS** (80+ mappings):
- Storage & Encryption: encrypt, bucket, cmek, kms, customer managed, object storage
- IAM & Security: iam, role, service account, impersonation, workload identity
- Networking: vpc, peering, shared vpc, firewall, load balancer, dns, nat, private access
- Database: cloud sql, high availability, mysql, postgres, replica, failover
- BigQuery: partition, cluster, materialized view, schedule
- GKE: gke, autoscaling, node pool, horizontal pod autoscaler, helm
- Serverless: cloud run, environment variable, cloud function, deploy
- Container: docker, artifact registry, cloud build
- Pub/Sub: pubsub, topic, subscription
- Data Processing: dataflow, dataproc, composer, airflow, spark
- Monitoring: logging, monitoring, metric, alert, dashboard, trace
- Infrastructure: terraform, deployment manager, gcloud"#;

/// Description of `list_google_cloud_products` for LLM consumption
pub const LIST_PRODUCTS_DESCRIPTION: &str = r#"List all available Google Cloud products with their documentation paths.

**WHEN TO USE**: Use this tool when:
- User wants to see what GCP services are available
- User is exploring GCP products
- You need to find the correct product ID for other tools
- User asks "what GCP services are there?" or similar

**OUTPUT**: Returns JSON with:
- totalProducts: Number of products listed
- products: Array of products with id, name, docsPath, docsUrl, description

**PRODUCTS INCLUDED** (20):
- Compute: compute, kubernetes, functions, run
- Storage: storage, firestore, spanner
- Database: sql, bigquery
- AI/ML: ai (Vertex AI), vision, speech, translate
- Networking: vpc, loadbalancing, cdn
- Security: iam
- Messaging: pubsub
- Monitoring: logging, monitoring

**TIP**: Use the returned 'docsPath' with 'fetch_google_cloud_doc' to get detailed documentation."#;

/// Description of `get_api_reference` for LLM consumption
pub const API_REFERENCE_DESCRIPTION: &str = r#"Get REST API reference documentation for a specific Google Cloud service.

**WHEN TO USE**: Use this tool when:
- User needs API endpoints, methods, or parameters
- User is developing integrations with GCP APIs
- User asks about REST API for a specific GCP service
- User needs to know available API resources for a service

**INPUT**:
- service (required): GCP service name (compute, storage, bigquery, pubsub, sql, kubernetes, functions, run, iam)
- resource (optional): Specific API resource (instances, buckets, datasets, topics, etc.)

**SUPPORTED SERVICES & RESOURCES**:
- compute: instances, disks, networks, firewalls, images, machineTypes
- storage: buckets, objects, notifications
- bigquery: datasets, tables, jobs, routines
- pubsub: topics, subscriptions, snapshots
- sql: instances, databases, users, backupRuns
- kubernetes: clusters, nodePools, operations
- functions: functions, operations, locations
- run: services, configurations, routes, revisions
- iam: roles, serviceAccounts, policies

**OUTPUT**: Returns JSON with:
- service: Service name
- description: Service description
- apiReferenceUrl: Full URL to API reference
- availableResources: List of available resources for this service
- documentation: Actual API documentation content (if available)
- fetchCommand: Path to pass to fetch_google_cloud_doc when the page could not be extracted

**EXAMPLE USAGE**:
- Get Compute Engine API overview: service="compute"
- Get Storage buckets API: service="storage", resource="buckets"
- Get BigQuery datasets API: service="bigquery", resource="datasets""#;

/// Extended documentation for LLM consumption (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# Google Cloud Docs Tools

Retrieve and search public Google Cloud documentation as clean markdown.

## Tools

### fetch_google_cloud_doc
- `path` (required): documentation path after cloud.google.com/
- Returns `title`, `url`, `content` (max 20000 chars), `contentLength`, `truncated`
- On failure returns `error`, `url` and `suggestion` (HTTP errors) or `rawTextPreview` (no content found)

### search_google_cloud_docs
- `query` (required): free-form natural language query
- `product` (optional): restrict the web search probe to a product (e.g. `bigquery`)
- Returns `query`, `product`, `totalResults`, `results` (top 3 with content), `otherRelatedDocs` (next 3)

### list_google_cloud_products
- No parameters
- Returns `totalProducts`, `products` (`id`, `name`, `docsPath`, `docsUrl`, `description`), `usage`

### get_api_reference
- `service` (required): product id (compute, storage, bigquery, pubsub, sql, kubernetes, functions, run, iam)
- `resource` (optional): API resource such as `instances` or `buckets`
- Returns the service metadata, `availableResources` and the extracted page under `documentation`

## Examples

### Fetch a page
```json
{"path": "storage/docs/creating-buckets"}
```

### Search within a product
```json
{"query": "partition table", "product": "bigquery"}
```

### API reference for one resource
```json
{"service": "storage", "resource": "buckets"}
```

## Behavior
- Navigation, banners, notes and other page chrome are removed before rendering
- Headings, paragraphs, code blocks, lists, tables and definition lists are kept in page order
- Search falls back to built-in keyword tables when live search returns nothing
- Errors are returned as JSON payloads, never as transport failures"#;
