// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Deserialize, JsonSchema)]
pub struct DomainPathParam {
    domain_id: String,
}

#[endpoint {
    method = GET,
    path = "/my-org/domains"
}]
pub async fn list_domains(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    respond(&rqctx, StatusCode::OK, |store| {
        let domains = store.list_domains();
        Ok(Some(serde_json::json!({
            "organization_domains": to_value(domains)?,
        })))
    })
}

#[endpoint {
    method = GET,
    path = "/my-org/domains/{domain_id}"
}]
pub async fn get_domain(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<DomainPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.get_domain(&path_param.domain_id)?).map(Some)
    })
}

#[endpoint {
    method = POST,
    path = "/my-org/domains"
}]
pub async fn create_domain(
    rqctx: RequestContext<Arc<ServerContext>>,
    body: TypedBody<CreateDomainRequest>,
) -> Result<Response<Body>, HttpError> {
    let request = body.into_inner();

    respond(&rqctx, StatusCode::CREATED, |store| {
        to_value(store.create_domain(request)?).map(Some)
    })
}

#[endpoint {
    method = DELETE,
    path = "/my-org/domains/{domain_id}"
}]
pub async fn delete_domain(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<DomainPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    respond(&rqctx, StatusCode::NO_CONTENT, |store| {
        store.delete_domain(&path_param.domain_id)?;
        Ok(None)
    })
}

#[endpoint {
    method = POST,
    path = "/my-org/domains/{domain_id}/verify"
}]
pub async fn verify_domain(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<DomainPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.verify_domain(&path_param.domain_id)?).map(Some)
    })
}
