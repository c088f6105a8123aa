use poet_core::{BridgeTextGenerator, BuildOptions, CorpusGraphBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs are controlled with RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();

    // Fold the corpus on several threads, 4 chunks per CPU
    // Tokens are lowercased, so bridges come out lowercase too
    let mut options = BuildOptions::default();
    options.parallel = true;
    options.set_chunk_factor(4)?;

    // Invalid chunk factor
    match options.set_chunk_factor(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Chunk factor 0 is invalid: {}", e),
    }

    let generator = BridgeTextGenerator::from_file("./data/voyage.txt", &options)?;
    log::info!(
        "graph has {} words and {} adjacencies",
        generator.graph().vertex_count(),
        generator.graph().edge_count()
    );

    // Every adjacency of the corpus with its count
    println!("{}", generator.graph());
    println!();

    // Bridge words are inserted wherever a two-hop path exists
    for phrase in ["Seek to explore new and exciting synergies", "Space the frontier", "Go no one"] {
        println!("{} => {}", phrase, generator.poem_line(phrase)?);
    }

    // Token level API: the input case is preserved
    let tokens = ["Boldly", "where", "one", "gone"];
    println!("{:?} => {:?}", tokens, generator.poem(&tokens[..])?);

    // Graphs can also be built token by token
    let mut builder = CorpusGraphBuilder::new();
    for token in ["the", "quick", "fox", "the", "slow", "fox"] {
        builder.push(token)?;
    }
    let fox = BridgeTextGenerator::new(builder.finish());
    println!("the fox => {}", fox.poem_line("the fox")?);

    Ok(())
}
