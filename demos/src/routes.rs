use idxheap::graph::WeightedGraph;

fn main() -> anyhow::Result<()> {
    let names = ["depot", "north", "east", "south", "west", "harbor"];
    let mut roads = WeightedGraph::new(names.len());
    for (a, b, km) in [
        (0, 1, 7),
        (0, 2, 9),
        (0, 5, 14),
        (1, 2, 10),
        (1, 3, 15),
        (2, 3, 11),
        (2, 5, 2),
        (3, 4, 6),
        (4, 5, 9),
    ] {
        roads.add_edge(a, b, km)?;
    }

    println!("Shortest routes from {}:", names[0]);
    for path in roads.dijkstra(0)? {
        match (path.distance, path.parent) {
            (Some(d), Some(p)) => println!("  {:<7} {:>3} km via {}", names[path.vertex], d, names[p]),
            (Some(d), None) => println!("  {:<7} {:>3} km", names[path.vertex], d),
            (None, _) => println!("  {:<7} unreachable", names[path.vertex]),
        }
    }

    println!("Cheapest road network:");
    for (a, b) in roads.mst_prim(0)? {
        println!("  {} - {}", names[a], names[b]);
    }

    Ok(())
}
