// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Deserialize, JsonSchema)]
pub struct IdentityProviderPathParam {
    idp_id: String,
}

#[endpoint {
    method = GET,
    path = "/my-org/identity-providers"
}]
pub async fn list_identity_providers(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    respond(&rqctx, StatusCode::OK, |store| {
        let identity_providers = store.list_identity_providers();
        Ok(Some(serde_json::json!({
            "identity_providers": to_value(identity_providers)?,
        })))
    })
}

#[endpoint {
    method = GET,
    path = "/my-org/identity-providers/{idp_id}"
}]
pub async fn get_identity_provider(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<IdentityProviderPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.get_identity_provider(&path_param.idp_id)?).map(Some)
    })
}

#[endpoint {
    method = POST,
    path = "/my-org/identity-providers"
}]
pub async fn create_identity_provider(
    rqctx: RequestContext<Arc<ServerContext>>,
    body: TypedBody<CreateIdentityProviderRequest>,
) -> Result<Response<Body>, HttpError> {
    let request = body.into_inner();

    respond(&rqctx, StatusCode::CREATED, |store| {
        to_value(store.create_identity_provider(request)?).map(Some)
    })
}

#[endpoint {
    method = PATCH,
    path = "/my-org/identity-providers/{idp_id}"
}]
pub async fn update_identity_provider(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<IdentityProviderPathParam>,
    body: TypedBody<UpdateIdentityProviderRequest>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.update_identity_provider(&path_param.idp_id, request)?)
            .map(Some)
    })
}

#[endpoint {
    method = DELETE,
    path = "/my-org/identity-providers/{idp_id}"
}]
pub async fn delete_identity_provider(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<IdentityProviderPathParam>,
) -> Result<Response<Body>, HttpError> {
    let path_param = path_param.into_inner();

    respond(&rqctx, StatusCode::NO_CONTENT, |store| {
        store.delete_identity_provider(&path_param.idp_id)?;
        Ok(None)
    })
}
