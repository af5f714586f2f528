use log::{error, info};
use simplelog::{Config, LevelFilter, SimpleLogger};
use splay_collections::splay_tree::SplayTree;

fn main() {
    if let Err(err) = SimpleLogger::init(LevelFilter::Debug, Config::default()) {
        eprintln!("Unable to initialize logger: {}", err);
    }

    let mut tree = SplayTree::new();
    for key in &[50, 40, 60, 30] {
        if let Err(err) = tree.try_insert(*key) {
            error!("Unable to insert {}: {}", key, err);
            return;
        }
    }
    info!("Inserted keys: {:?}", tree);

    info!("contains(30) = {}, root = {:?}", tree.contains(&30), tree.root());
    let found = tree.find(&25).cloned();
    info!("find(25) = {:?}, root = {:?}", found, tree.root());
    info!("min() = {:?}", tree.min());
    info!("max() = {:?}", tree.max());
    info!("remove(60) = {:?}, keys = {:?}", tree.remove(&60), tree);

    tree.clear();
}
