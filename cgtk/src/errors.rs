error_chain! {
    foreign_links {
        Json(::serde_json::Error);
    }

    errors {
        DuplicateClusterIds(ids: Vec<String>) {
            description("non-unique cluster ids")
            display("Non-unique cluster ids: {:?}", ids)
        }
        MarginalNotFound(vars: Vec<String>) {
            description("no cluster contains all requested variables")
            display("No cluster with variables containing {:?}", vars)
        }
        EmptyGraph {
            description("cluster graph without clusters")
            display("Cannot build or query a cluster graph without any factor")
        }
    }
}
