//! Example: Generate a Voronoi tile map and look around
//!
//! Run with `RUST_LOG=voronoi_tilemap=debug` to see generation timings.

use tracing_subscriber::EnvFilter;
use voronoi_tilemap::*;

const WIDTH: usize = 60;
const HEIGHT: usize = 24;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Voronoi Tile Map Example");
    println!("========================\n");

    let config = MapConfigBuilder::new()
        .width(WIDTH)
        .unwrap()
        .height(HEIGHT)
        .unwrap()
        .seed(42)
        .build()
        .unwrap();
    let mut map = TileMap::from_config(config).expect("Failed to create map");

    let palette = vec![
        TerrainType::new("Grass", "plains")
            .with_colors(["green", "lime"])
            .with_characters(['"', ',', '.']),
        TerrainType::new("Flowers", "plains").with_characters(['*']),
        TerrainType::new("Sand", "desert").with_characters(['.', ':']),
        TerrainType::new("Tree", "forest")
            .with_characters(['T'])
            .blocking_vision(true),
        TerrainType::new("Moss", "forest").with_characters([',']),
        TerrainType::new("Boulder", "hills")
            .with_characters(['O'])
            .blocking_vision(true)
            .blocking_movement(true),
        TerrainType::new("Gravel", "hills").with_characters(['%']),
    ];
    let groups = ["plains", "desert", "forest", "hills"];

    let mut rng = SeededRandom::new(7);
    let sites: Vec<VoronoiSite> = (0..8)
        .map(|id| {
            VoronoiSite::new(
                id,
                rng.rand_int(0, WIDTH as i64 - 1) as i32,
                rng.rand_int(0, HEIGHT as i64 - 1) as i32,
            )
        })
        .collect();

    map.generate_voronoi(WIDTH, HEIGHT, &sites, &groups, &palette)
        .expect("Failed to generate map");

    println!("Regions:");
    for region in map.regions() {
        println!(
            "  Region {}: site=({}, {}), tiles={}, edges={}, corners={}, neighbours={:?}",
            region.id,
            region.site.x,
            region.site.y,
            region.tile_count(),
            region.edge_cells.len(),
            region.corner_cells.len(),
            region.neighbour_ids
        );
    }
    println!();

    let observer = (sites[0].x, sites[0].y);
    let visible = map.fov(10, observer.0, observer.1);
    println!(
        "Observer at {:?} sees {} tiles ({} explored)\n",
        observer,
        visible.len(),
        map.get_explored_cells().len()
    );

    for y in 0..HEIGHT as i32 {
        let row: String = (0..WIDTH as i32)
            .map(|x| {
                if (x, y) == observer {
                    '@'
                } else if !map.is_explored(x, y) {
                    ' '
                } else {
                    map.get_cell(x, y)
                        .and_then(|c| c.terrain.characters.first().copied())
                        .unwrap_or('?')
                }
            })
            .collect();
        println!("{row}");
    }

    if let Some(pos) = map.world_coords(observer.0, observer.1) {
        println!("\nObserver world position: ({:.1}, {:.1})", pos.x, pos.y);
    }
}
