use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};

use serde::Deserialize;
use poet_core::{list_files, BridgeTextGenerator, BuildOptions, CorpusGraphBuilder, WeightedDirectedGraph};

/// Struct representing query parameters for the `/v1/poem` endpoint
#[derive(Deserialize)]
struct PoemQuery {
	input: Option<String>
}

#[derive(Deserialize)]
struct CorporaQuery {
	names: Option<String>
}

/// Server settings, read from the environment.
///
/// - `POET_HOST` (default `127.0.0.1`)
/// - `POET_PORT` (default `5000`)
/// - `POET_DATA_DIR` (default `./data`), folder holding `.txt` corpora
#[derive(Clone, Debug)]
struct ServerConfig {
	host: String,
	port: u16,
	data_dir: PathBuf,
}

impl ServerConfig {
	fn from_env() -> Result<Self, String> {
		let host = env::var("POET_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
		let port = match env::var("POET_PORT") {
			Ok(s) => s.parse::<u16>().map_err(|_| format!("POET_PORT must be a port number, got {}", s))?,
			Err(_) => 5000,
		};
		let data_dir = PathBuf::from(env::var("POET_DATA_DIR").unwrap_or_else(|_| "./data".to_owned()));
		Ok(Self { host, port, data_dir })
	}
}

struct SharedData {
	generator: BridgeTextGenerator,
	corpora: Vec<String>,
	data_dir: PathBuf,
}

impl SharedData {
	fn new(data_dir: PathBuf) -> Self {
		Self {
			generator: BridgeTextGenerator::new(WeightedDirectedGraph::new()),
			corpora: Vec::new(),
			data_dir,
		}
	}

	/// Names of the `.txt` corpora in the data folder, without extension.
	fn available_corpora(&self) -> io::Result<Vec<String>> {
		let files = list_files(&self.data_dir, "txt")?;
		Ok(files
			.iter()
			.filter_map(|file| Path::new(file).file_stem())
			.map(|stem| stem.to_string_lossy().to_string())
			.collect())
	}

	/// Rebuilds the graph from the named corpora, merged in order.
	///
	/// Names must be listed by `available_corpora`.
	///
	/// The current graph is kept if any corpus fails to load.
	fn load(&mut self, names: &[&str]) -> Result<(), String> {
		let mut options = BuildOptions::default();
		options.parallel = true;
		let mut graph = WeightedDirectedGraph::new();
		for name in names {
			let corpus_path = self.data_dir.join(format!("{}.txt", name));
			let partial_graph = CorpusGraphBuilder::from_file(&corpus_path, &options)
				.map_err(|e| format!("Failed to load corpus {}: {}", name, e))?;
			graph.merge(&partial_graph)
				.map_err(|e| format!("Failed to merge corpus {}: {}", name, e))?;
		}

		self.generator = BridgeTextGenerator::new(graph).with_case_folding(options.lowercase);
		self.corpora = names.iter().map(|s| s.to_string()).collect();
		Ok(())
	}
}

/// HTTP GET endpoint `/v1/poem`
///
/// Inserts bridge words into `input` using the loaded corpora.
#[get("/v1/poem")]
async fn get_poem(data: web::Data<Mutex<SharedData>>, query: web::Query<PoemQuery>) -> impl Responder {
	let input = match &query.input {
		Some(s) if !s.trim().is_empty() => s,
		_ => return HttpResponse::BadRequest().body("Missing or empty input"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Graph lock failed"),
	};

	match shared_data.generator.poem_line(input) {
		Ok(poem) => HttpResponse::Ok().body(poem),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Graph lock failed"),
	};
	match shared_data.available_corpora() {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Graph lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpora.join("\n"))
}

#[get("/v1/graph")]
async fn get_graph(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Graph lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.graph().to_string())
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorporaQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Graph lock failed"),
	};

	// Only corpora found in the data folder can be loaded
	let available = match shared_data.available_corpora() {
		Ok(names) => names,
		Err(_) => return HttpResponse::InternalServerError().body("Failed to list corpora"),
	};
	if let Some(unknown) = corpus_names.iter().find(|name| !available.iter().any(|a| a.as_str() == **name)) {
		warn!("rejected corpus name {:?}", unknown);
		return HttpResponse::BadRequest().body(format!("Unknown corpus: {}", unknown));
	}

	match shared_data.load(&corpus_names) {
		Ok(_) => {
			info!("loaded corpora: {}", corpus_names.join(", "));
			HttpResponse::Ok().body("Corpora loaded successfully")
		}
		Err(e) => {
			warn!("{}", e);
			HttpResponse::InternalServerError().body(e)
		}
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_poem)
		.service(get_corpora)
		.service(put_corpora)
		.service(get_loaded_corpora)
		.service(get_graph);
}

/// Main entry point for the server.
///
/// Starts with an empty graph wrapped in a `Mutex`; corpora are loaded
/// through `PUT /v1/load_corpora`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = ServerConfig::from_env()
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	info!("serving {} on {}:{}", config.data_dir.display(), config.host, config.port);

	let shared_data = web::Data::new(Mutex::new(SharedData::new(config.data_dir.clone())));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
