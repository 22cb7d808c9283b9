// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[endpoint {
    method = GET,
    path = "/my-org/details"
}]
pub async fn get_details(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.get_details()).map(Some)
    })
}

#[endpoint {
    method = PATCH,
    path = "/my-org/details"
}]
pub async fn update_details(
    rqctx: RequestContext<Arc<ServerContext>>,
    body: TypedBody<UpdateOrganizationDetailsRequest>,
) -> Result<Response<Body>, HttpError> {
    let request = body.into_inner();

    respond(&rqctx, StatusCode::OK, |store| {
        to_value(store.update_details(request)?).map(Some)
    })
}
