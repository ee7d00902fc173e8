use grid_route::{Command, GridPathEngine, SearchResult, NO_PATH_NOTICE};

// Mirrors a "place random walls, then search" interaction: a fifth of the
// cells become obstacles and the engine routes corner to corner.
fn main() {
    let mut engine = GridPathEngine::new(22, 53);
    engine.apply(Command::RandomizeObstacles).unwrap();
    match engine.apply(Command::FindShortestPath).unwrap() {
        Some(SearchResult::Found) => {
            println!("Path of {} steps:", engine.path().len());
            print!("{}", engine);
        }
        _ => println!("{}", NO_PATH_NOTICE),
    }
}
