//! Static catalogs: products, keyword routes and REST API references
//!
//! Read-only process-lifetime data. Order matters: product and keyword
//! tables are scanned front to back and their hits keep that order.

/// A documented Google Cloud product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Short identifier used by the tools (e.g. `compute`)
    pub id: &'static str,
    pub name: &'static str,
    /// Path of the product's docs landing page
    pub docs_path: &'static str,
    pub description: &'static str,
}

/// REST reference root and resources of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiReference {
    /// Product id this reference belongs to
    pub service: &'static str,
    /// Path of the REST reference root
    pub rest_path: &'static str,
    pub resources: &'static [&'static str],
}

/// Keyword that routes a query to documentation paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRoute {
    /// Lowercase substring matched against the lowercased query
    pub keyword: &'static str,
    pub paths: &'static [&'static str],
}

const fn product(
    id: &'static str,
    name: &'static str,
    docs_path: &'static str,
    description: &'static str,
) -> Product {
    Product {
        id,
        name,
        docs_path,
        description,
    }
}

const fn route(keyword: &'static str, paths: &'static [&'static str]) -> KeywordRoute {
    KeywordRoute { keyword, paths }
}

pub const PRODUCTS: &[Product] = &[
    product("compute", "Compute Engine", "compute/docs", "Virtual machines and infrastructure"),
    product("storage", "Cloud Storage", "storage/docs", "Object storage service"),
    product("bigquery", "BigQuery", "bigquery/docs", "Data warehouse and analytics"),
    product("kubernetes", "Google Kubernetes Engine", "kubernetes-engine/docs", "Managed Kubernetes service"),
    product("functions", "Cloud Functions", "functions/docs", "Serverless compute platform"),
    product("run", "Cloud Run", "run/docs", "Serverless containers"),
    product("pubsub", "Pub/Sub", "pubsub/docs", "Messaging and event ingestion"),
    product("sql", "Cloud SQL", "sql/docs", "Managed relational databases"),
    product("firestore", "Firestore", "firestore/docs", "NoSQL document database"),
    product("spanner", "Cloud Spanner", "spanner/docs", "Globally distributed database"),
    product("ai", "Vertex AI", "vertex-ai/docs", "Machine learning platform"),
    product("vision", "Cloud Vision", "vision/docs", "Image analysis API"),
    product("speech", "Cloud Speech-to-Text", "speech-to-text/docs", "Speech recognition API"),
    product("translate", "Cloud Translation", "translate/docs", "Translation API"),
    product("iam", "IAM", "iam/docs", "Identity and Access Management"),
    product("vpc", "VPC", "vpc/docs", "Virtual Private Cloud networking"),
    product("loadbalancing", "Cloud Load Balancing", "load-balancing/docs", "Global load balancing"),
    product("cdn", "Cloud CDN", "cdn/docs", "Content delivery network"),
    product("logging", "Cloud Logging", "logging/docs", "Log management and analysis"),
    product("monitoring", "Cloud Monitoring", "monitoring/docs", "Infrastructure monitoring"),
];

pub const API_REFERENCES: &[ApiReference] = &[
    ApiReference {
        service: "compute",
        rest_path: "compute/docs/reference/rest/v1",
        resources: &["instances", "disks", "networks", "firewalls", "images", "machineTypes"],
    },
    ApiReference {
        service: "storage",
        rest_path: "storage/docs/json_api/v1",
        resources: &["buckets", "objects", "notifications"],
    },
    ApiReference {
        service: "bigquery",
        rest_path: "bigquery/docs/reference/rest",
        resources: &["datasets", "tables", "jobs", "routines"],
    },
    ApiReference {
        service: "pubsub",
        rest_path: "pubsub/docs/reference/rest",
        resources: &["topics", "subscriptions", "snapshots"],
    },
    ApiReference {
        service: "sql",
        rest_path: "sql/docs/mysql/admin-api/rest/v1",
        resources: &["instances", "databases", "users", "backupRuns"],
    },
    ApiReference {
        service: "kubernetes",
        rest_path: "kubernetes-engine/docs/reference/rest",
        resources: &["clusters", "nodePools", "operations"],
    },
    ApiReference {
        service: "functions",
        rest_path: "functions/docs/reference/rest/v2",
        resources: &["functions", "operations", "locations"],
    },
    ApiReference {
        service: "run",
        rest_path: "run/docs/reference/rest",
        resources: &["services", "configurations", "routes", "revisions"],
    },
    ApiReference {
        service: "iam",
        rest_path: "iam/docs/reference/rest",
        resources: &["roles", "serviceAccounts", "policies"],
    },
];

/// Keyword routes. Every keyword that occurs in the query fires; longer
/// keywords get no priority over shorter ones.
pub const KEYWORD_ROUTES: &[KeywordRoute] = &[
    // Storage & encryption
    route("encrypt", &["storage/docs/encryption", "kms/docs", "storage/docs/encryption/customer-managed-keys"]),
    route("customer managed", &["storage/docs/encryption/customer-managed-keys", "kms/docs/cmek"]),
    route("share", &["storage/docs/access-control", "iam/docs/granting-changing-revoking-access"]),
    route("cross account", &["iam/docs/granting-changing-revoking-access", "storage/docs/access-control/cross-project"]),
    route("cross project", &["storage/docs/access-control/cross-project", "iam/docs/granting-changing-revoking-access"]),
    route("bucket", &["storage/docs/creating-buckets", "storage/docs/access-control", "storage/docs"]),
    route("object storage", &["storage/docs", "storage/docs/objects"]),
    route("permission", &["iam/docs/understanding-roles", "iam/docs/granting-changing-revoking-access"]),
    // IAM & security
    route("iam", &["iam/docs", "iam/docs/understanding-roles"]),
    route("role", &["iam/docs/understanding-roles", "iam/docs/creating-custom-roles"]),
    route("kms", &["kms/docs", "kms/docs/quickstart"]),
    route("cmek", &["storage/docs/encryption/customer-managed-keys", "kms/docs/cmek"]),
    route("service account", &["iam/docs/service-accounts", "iam/docs/creating-managing-service-accounts"]),
    route("impersonat", &["iam/docs/service-account-impersonation", "iam/docs/impersonating-service-accounts"]),
    route("workload", &["iam/docs/workload-identity-federation", "kubernetes-engine/docs/how-to/workload-identity"]),
    // Networking
    route("vpc", &["vpc/docs", "vpc/docs/shared-vpc", "vpc/docs/vpc-peering"]),
    route("peering", &["vpc/docs/vpc-peering", "vpc/docs/using-vpc-peering"]),
    route("shared vpc", &["vpc/docs/shared-vpc", "vpc/docs/provisioning-shared-vpc"]),
    route("firewall", &["vpc/docs/firewalls", "vpc/docs/using-firewalls"]),
    route("load balancer", &["load-balancing/docs", "load-balancing/docs/load-balancing-overview"]),
    route("ingress", &["kubernetes-engine/docs/concepts/ingress", "load-balancing/docs/https"]),
    route("ssl", &["load-balancing/docs/ssl-certificates", "certificate-manager/docs"]),
    route("dns", &["dns/docs", "dns/docs/overview"]),
    route("private access", &["vpc/docs/private-google-access", "vpc/docs/configure-private-google-access"]),
    route("private service", &["vpc/docs/private-service-connect", "vpc/docs/configure-private-service-connect-services"]),
    route("nat", &["vpc/docs/nat-service", "vpc/docs/using-nat"]),
    // Cloud SQL
    route("cloud sql", &["sql/docs", "sql/docs/introduction"]),
    route("high availability", &["sql/docs/high-availability", "sql/docs/configure-ha"]),
    route("ha", &["sql/docs/high-availability", "sql/docs/configure-ha"]),
    route("mysql", &["sql/docs/mysql", "sql/docs/mysql/quickstart"]),
    route("postgres", &["sql/docs/postgres", "sql/docs/postgres/quickstart"]),
    route("sql server", &["sql/docs/sqlserver", "sql/docs/sqlserver/quickstart"]),
    route("replica", &["sql/docs/replication", "sql/docs/mysql/replication/create-replica"]),
    route("failover", &["sql/docs/high-availability", "sql/docs/configure-ha"]),
    route("read replica", &["sql/docs/replication", "sql/docs/mysql/replication"]),
    route("point in time", &["sql/docs/backup-recovery/pitr", "sql/docs/mysql/backup-recovery/pitr"]),
    // BigQuery
    route("bigquery", &["bigquery/docs", "bigquery/docs/introduction"]),
    route("partition", &["bigquery/docs/partitioned-tables", "bigquery/docs/creating-partitioned-tables"]),
    route("cluster", &["bigquery/docs/clustered-tables", "bigquery/docs/creating-clustered-tables"]),
    route("materialized view", &["bigquery/docs/materialized-views-intro", "bigquery/docs/materialized-views-create"]),
    route("schedule", &["bigquery/docs/scheduling-queries", "bigquery/docs/scheduled-queries"]),
    // GKE
    route("gke", &["kubernetes-engine/docs", "kubernetes-engine/docs/concepts/kubernetes-engine-overview"]),
    route("kubernetes", &["kubernetes-engine/docs", "kubernetes-engine/docs/quickstart"]),
    route("autoscal", &["kubernetes-engine/docs/concepts/cluster-autoscaler", "kubernetes-engine/docs/how-to/cluster-autoscaler"]),
    route("node pool", &["kubernetes-engine/docs/concepts/node-pools", "kubernetes-engine/docs/how-to/node-pools"]),
    route("horizontal pod", &["kubernetes-engine/docs/concepts/horizontalpodautoscaler", "kubernetes-engine/docs/how-to/horizontal-pod-autoscaling"]),
    route("helm", &["kubernetes-engine/docs/how-to/deploying-workloads-using-helm"]),
    // Serverless
    route("cloud run", &["run/docs", "run/docs/quickstarts"]),
    route("environment variable", &["run/docs/configuring/environment-variables", "functions/docs/configuring/env-var"]),
    route("cloud function", &["functions/docs", "functions/docs/quickstart"]),
    route("app engine", &["appengine/docs", "appengine/docs/standard"]),
    route("deploy", &["run/docs/deploying", "functions/docs/deploy", "kubernetes-engine/docs/deploy-app-cluster"]),
    // Containers & artifacts
    route("container", &["run/docs", "kubernetes-engine/docs", "artifact-registry/docs"]),
    route("docker", &["artifact-registry/docs/docker", "cloud-build/docs/building/build-containers"]),
    route("artifact registry", &["artifact-registry/docs", "artifact-registry/docs/docker"]),
    route("container registry", &["container-registry/docs"]),
    route("cloud build", &["cloud-build/docs", "cloud-build/docs/quickstart-build"]),
    // Secrets & config
    route("secret", &["secret-manager/docs", "secret-manager/docs/quickstart"]),
    route("secret manager", &["secret-manager/docs", "secret-manager/docs/creating-and-accessing-secrets"]),
    route("config", &["runtime-config/docs", "deployment-manager/docs"]),
    // Messaging
    route("pubsub", &["pubsub/docs", "pubsub/docs/overview"]),
    route("pub/sub", &["pubsub/docs", "pubsub/docs/overview"]),
    route("topic", &["pubsub/docs/create-topic", "pubsub/docs/admin"]),
    route("subscription", &["pubsub/docs/subscriber", "pubsub/docs/create-subscription"]),
    // Data processing
    route("dataflow", &["dataflow/docs", "dataflow/docs/quickstarts"]),
    route("dataproc", &["dataproc/docs", "dataproc/docs/quickstarts"]),
    route("composer", &["composer/docs", "composer/docs/quickstart"]),
    route("airflow", &["composer/docs", "composer/docs/concepts/airflow"]),
    route("spark", &["dataproc/docs/spark", "dataproc/docs/concepts/spark"]),
    // Observability
    route("logging", &["logging/docs", "logging/docs/view/overview"]),
    route("log", &["logging/docs", "logging/docs/view/logs-viewer-interface"]),
    route("monitoring", &["monitoring/docs", "monitoring/docs/monitoring-overview"]),
    route("metric", &["monitoring/docs/metrics", "monitoring/docs/custom-metrics"]),
    route("alert", &["monitoring/docs/alerting", "monitoring/docs/alerting/policies"]),
    route("dashboard", &["monitoring/docs/dashboards", "monitoring/docs/dashboards/build-dashboards"]),
    route("trace", &["trace/docs", "trace/docs/quickstart"]),
    // Infrastructure
    route("terraform", &["docs/terraform", "docs/terraform/quickstart"]),
    route("deployment manager", &["deployment-manager/docs"]),
    route("gcloud", &["sdk/gcloud/reference"]),
    route("cloud shell", &["shell/docs", "shell/docs/quickstart"]),
    // Misc
    route("backup", &["storage/docs/lifecycle", "sql/docs/backup-recovery/backups"]),
    route("snapshot", &["compute/docs/disks/create-snapshots", "compute/docs/disks/snapshots"]),
    route("api", &["apis/docs/overview", "endpoints/docs"]),
    route("authentication", &["docs/authentication", "iam/docs/authentication"]),
    route("cloud scheduler", &["scheduler/docs", "scheduler/docs/quickstart"]),
    route("cloud tasks", &["tasks/docs", "tasks/docs/quickstart"]),
    route("budget", &["billing/docs/how-to/budgets", "billing/docs/how-to/budgets-programmatic"]),
    route("cost", &["billing/docs/how-to/export-data-bigquery", "billing/docs/onboarding-checklist"]),
];

/// Look up a product by id, case-insensitively
pub fn find_product(id: &str) -> Option<&'static Product> {
    let id = id.trim().to_lowercase();
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Look up the REST reference of a product id
pub fn find_api_reference(service: &str) -> Option<&'static ApiReference> {
    API_REFERENCES.iter().find(|r| r.service == service)
}

/// Product ids in catalog order
pub fn product_ids() -> Vec<String> {
    PRODUCTS.iter().map(|p| p.id.to_string()).collect()
}

/// Documentation paths the catalogs associate with a lowercased query.
///
/// Product hits (id or name) come first, then keyword hits, both in table
/// order; duplicates keep their first position.
pub fn heuristic_paths(query_lower: &str) -> Vec<&'static str> {
    let product_paths = PRODUCTS
        .iter()
        .filter(|p| query_lower.contains(p.id) || query_lower.contains(&p.name.to_lowercase()))
        .map(|p| p.docs_path);

    let keyword_paths = KEYWORD_ROUTES
        .iter()
        .filter(|r| query_lower.contains(r.keyword))
        .flat_map(|r| r.paths.iter().copied());

    let mut paths: Vec<&'static str> = Vec::new();
    for path in product_paths.chain(keyword_paths) {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}
