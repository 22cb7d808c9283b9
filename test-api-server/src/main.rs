// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;

use clap::Parser;
use myorg_test_api_server::create_http_server;
use myorg_test_api_server::terminal_logger;

#[derive(Debug, Parser)]
#[clap(about = "In-memory My Organization API server")]
struct Args {
    /// Address to serve on; CLI runs point their token's `iss` here
    #[clap(long, default_value = DEFAULT_BIND_ADDR)]
    bind_addr: SocketAddr,
}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4568";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;

    let log = terminal_logger();
    let server = create_http_server(log, Some(args.bind_addr))?;
    server.await.map_err(|e| anyhow::anyhow!("server stopped: {e}"))
}
