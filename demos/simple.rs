use grid_route::{GridPathEngine, SearchResult, NO_PATH_NOTICE};

// In this example a path is found on a grid with shape
// S....
// .###.
// .#E..
// .....
// S marks the start
// E marks the end
fn main() {
    let mut engine = GridPathEngine::new(4, 5);
    engine.set_end(12).unwrap();
    for ix in [6, 7, 8, 11] {
        engine.toggle_obstacle(ix).unwrap();
    }
    match engine.find_shortest_path() {
        SearchResult::Found => {
            println!("A path has been found:");
            // The engine stores the path walking backward from the end.
            for ix in engine.path().iter().rev() {
                println!("({}, {})", ix / engine.cols(), ix % engine.cols());
            }
            print!("{}", engine);
        }
        SearchResult::NotFound => println!("{}", NO_PATH_NOTICE),
    }
}
