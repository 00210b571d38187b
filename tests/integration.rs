//! End-to-end integration tests for the lexnet engine.
//!
//! Each test writes a small self-consistent corpus to a temporary
//! directory and loads it through the full pipeline: index/data parsing,
//! graph construction, identifier resolution, taxonomy traversal, and the
//! similarity metrics.

use std::fs;
use std::path::Path;

use lexnet::error::{LexnetError, LookupError};
use lexnet::ic::IcTable;
use lexnet::pos::PartOfSpeech;
use lexnet::relation::Relation;
use lexnet::wordnet::{WordNet, WordNetConfig};

const INDEX_NOUN: &str = "\
entity n 1 1 ~ 1 0 00000001
animal n 1 2 @ ~ 1 0 00000002
canine n 2 2 @ ~ 2 0 00000009 00000003
canid n 1 1 @ 1 0 00000003
dog n 1 1 @ 1 0 00000005
domestic_dog n 1 1 @ 1 0 00000005
domestic_animal n 1 1 @ 1 0 00000004
vehicle n 1 1 @ 1 0 00000006
car n 1 1 @ 1 0 00000007
auto n 1 1 @ 1 0 00000007
bus n 1 1 @ 1 0 00000008
cuspid n 1 1 @ 1 0 00000009
";

const INDEX_VERB: &str = "\
run v 1 1 @ 1 0 00000101
travel v 1 1 ~ 1 0 00000102
";

const INDEX_ADJ: &str = "\
fast a 1 1 ! 1 0 00000201
slow a 1 1 ! 1 0 00000202
quick a 1 1 & 1 0 00000203
speedy a 1 1 & 1 0 00000203
";

const INDEX_ADV: &str = "\
quickly r 1 0 1 0 00000301
";

const DATA_NOUN: &str = "\
00000001 03 n 01 entity 0 000 | that which exists
00000002 05 n 01 animal 0 001 @ 00000001 n 0000 | a living organism; \"animals eat and breathe\"
00000003 05 n 02 canine 0 canid 0 001 @ 00000002 n 0000 | a carnivorous mammal with a long muzzle
00000004 05 n 01 domestic_animal 0 001 @ 00000002 n 0000 | an animal kept by humans
00000005 05 n 02 dog 0 domestic_dog 0 002 @ 00000003 n 0000 @ 00000004 n 0000 | a domesticated canine; \"the dog barked\"
00000006 06 n 01 vehicle 0 001 @ 00000001 n 0000 | a conveyance that transports people or goods
00000007 06 n 02 car 0 auto 0 001 @ 00000006 n 0000 | a motor vehicle; \"he drove the car to work\"
00000008 06 n 01 bus 0 001 @ 00000006 n 0000 | a large motor vehicle carrying passengers
00000009 04 n 02 canine 0 cuspid 0 001 @ 00000001 n 0000 | a pointed tooth
";

const DATA_VERB: &str = "\
00000101 29 v 01 run 0 001 @ 00000102 v 0000 01 + 02 00 | move fast on foot; \"he ran home\"
00000102 38 v 01 travel 0 000 | change location
";

const DATA_ADJ: &str = "\
00000201 00 a 01 fast 0 001 ! 00000202 a 0101 | acting or moving quickly; \"a fast car\"
00000202 00 a 01 slow 0 001 ! 00000201 a 0101 | not fast
00000203 00 s 02 quick 0 speedy 0 001 & 00000201 a 0000 | accomplished in a short time
";

const DATA_ADV: &str = "\
00000301 02 r 01 quickly 0 000 | with speed
";

const LEXNAMES: &str = "\
03	noun.Tops	1
04	noun.body	1
05	noun.animal	1
06	noun.artifact	1
29	verb.motion	2
38	verb.motion	2
";

const VERB_EXC: &str = "\
ran run
";

const IC_DATA: &str = "\
wnver::fixture
1n 2000.0 ROOT
2n 800.0
3n 100.0
4n 50.0
5n 60.0
6n 300.0
7n 150.0
8n 80.0
9n 40.0
102v 500.0 ROOT
101v 120.0
";

const TAB_FRA: &str = "\
# fra-wn\ttype\tlemma
00000005-n\tlemma\tchien
00000005-n\tlemma\tchien domestique
00000007-n\tlemma\tvoiture
00000101-v\tlemma\tcourir
";

const DATA_HEADER: &str = "  1 This software and database is provided as a fixture.\n";

fn write_corpus(dir: &Path) {
    fs::write(dir.join("index.noun"), INDEX_NOUN).unwrap();
    fs::write(dir.join("index.verb"), INDEX_VERB).unwrap();
    fs::write(dir.join("index.adj"), INDEX_ADJ).unwrap();
    fs::write(dir.join("index.adv"), INDEX_ADV).unwrap();
    fs::write(dir.join("data.noun"), format!("{DATA_HEADER}{DATA_NOUN}")).unwrap();
    fs::write(dir.join("data.verb"), format!("{DATA_HEADER}{DATA_VERB}")).unwrap();
    fs::write(dir.join("data.adj"), format!("{DATA_HEADER}{DATA_ADJ}")).unwrap();
    fs::write(dir.join("data.adv"), format!("{DATA_HEADER}{DATA_ADV}")).unwrap();
    fs::write(dir.join("lexnames"), LEXNAMES).unwrap();
    fs::write(dir.join("verb.exc"), VERB_EXC).unwrap();
    fs::write(dir.join("ic-fixture.dat"), IC_DATA).unwrap();
}

fn write_omw(dir: &Path) {
    let fra = dir.join("fra");
    fs::create_dir_all(&fra).unwrap();
    fs::write(fra.join("wn-data-fra.tab"), TAB_FRA).unwrap();
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn test_wordnet() -> (tempfile::TempDir, WordNet) {
    init_tracing();
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path());
    write_omw(&dir.path().join("omw"));
    let wn = WordNet::load(
        WordNetConfig::new(dir.path()).with_omw_dir(dir.path().join("omw")),
    )
    .unwrap();
    (dir, wn)
}

#[test]
fn every_loaded_synset_round_trips() {
    let (_dir, wn) = test_wordnet();
    assert_eq!(wn.all_synsets(None).len(), 14);
    for synset in wn.all_synsets(None) {
        let found = wn
            .synset_from_pos_and_offset(synset.pos(), synset.offset())
            .unwrap();
        assert_eq!(found.offset(), synset.offset());
        // Derived display name is stable across repeated calls.
        assert_eq!(found.name(), wn.synset(found.name()).unwrap().name());
    }
}

#[test]
fn dog_hypernyms_cover_both_parents() {
    let (_dir, wn) = test_wordnet();
    let dog = wn.synset("dog.n.01").unwrap();
    let parents: Vec<&str> = dog
        .related(Relation::Hypernym)
        .iter()
        .map(|&id| wn.store().resolve(id).unwrap().name())
        .collect();
    assert!(parents.contains(&"canine.n.02"));
    assert!(parents.contains(&"domestic_animal.n.01"));
}

#[test]
fn common_hypernyms_of_car_and_bus() {
    let (_dir, wn) = test_wordnet();
    let car = wn.synset("car.n.01").unwrap();
    let bus = wn.synset("bus.n.01").unwrap();
    let vehicle = wn.synset("vehicle.n.01").unwrap();
    let common = wn.common_hypernyms(car, bus).unwrap();
    assert!(common.contains(&vehicle.id()));
}

#[test]
fn similarity_identity_and_symmetry() {
    let (_dir, wn) = test_wordnet();
    let dog = wn.synset("dog.n.01").unwrap();
    let car = wn.synset("car.n.01").unwrap();
    let ic = IcTable::load(&_dir.path().join("ic-fixture.dat")).unwrap();

    assert_eq!(wn.path_similarity(dog, dog, true, None).unwrap(), Some(1.0));

    assert_eq!(
        wn.path_similarity(dog, car, true, None).unwrap(),
        wn.path_similarity(car, dog, true, None).unwrap()
    );
    assert_eq!(
        wn.lch_similarity(dog, car, true, None).unwrap(),
        wn.lch_similarity(car, dog, true, None).unwrap()
    );
    assert_eq!(
        wn.wup_similarity(dog, car, true, true, None).unwrap(),
        wn.wup_similarity(car, dog, true, true, None).unwrap()
    );
    assert_eq!(
        wn.res_similarity(dog, car, &ic).unwrap(),
        wn.res_similarity(car, dog, &ic).unwrap()
    );
    assert_eq!(
        wn.jcn_similarity(dog, car, &ic).unwrap(),
        wn.jcn_similarity(car, dog, &ic).unwrap()
    );
    assert_eq!(
        wn.lin_similarity(dog, car, &ic).unwrap(),
        wn.lin_similarity(car, dog, &ic).unwrap()
    );
}

#[test]
fn information_content_metrics_against_hand_math() {
    let (_dir, wn) = test_wordnet();
    let ic = IcTable::load(&_dir.path().join("ic-fixture.dat")).unwrap();
    let car = wn.synset("car.n.01").unwrap();
    let bus = wn.synset("bus.n.01").unwrap();

    let ic_car = (2000.0_f64 / 150.0).ln();
    let ic_bus = (2000.0_f64 / 80.0).ln();
    let ic_vehicle = (2000.0_f64 / 300.0).ln();

    let res = wn.res_similarity(car, bus, &ic).unwrap();
    assert!((res - ic_vehicle).abs() < 1e-12);

    let jcn = wn.jcn_similarity(car, bus, &ic).unwrap();
    let expected = 1.0 / (ic_car + ic_bus - 2.0 * ic_vehicle);
    assert!((jcn - expected).abs() < 1e-12);

    let lin = wn.lin_similarity(car, bus, &ic).unwrap();
    let expected = 2.0 * ic_vehicle / (ic_car + ic_bus);
    assert!((lin - expected).abs() < 1e-12);
}

#[test]
fn adjective_satellite_alias() {
    let (_dir, wn) = test_wordnet();
    // quick only exists as a satellite; the plain lookup finds it anyway.
    let via_plain = wn
        .synset_from_pos_and_offset(PartOfSpeech::Adjective, 203)
        .unwrap();
    let via_satellite = wn
        .synset_from_pos_and_offset(PartOfSpeech::AdjectiveSatellite, 203)
        .unwrap();
    assert_eq!(via_plain.id(), via_satellite.id());

    // Asymmetric sense-name behavior.
    assert_eq!(wn.synset("quick.a.01").unwrap().offset(), 203);
    assert!(matches!(
        wn.synset("fast.s.01").unwrap_err(),
        LexnetError::Lookup(LookupError::SatelliteMismatch { .. })
    ));
}

#[test]
fn invalid_sense_key_ss_type_names_the_field() {
    let (_dir, wn) = test_wordnet();
    let err = wn.synset_from_sense_key("dog%9:05:00::").unwrap_err();
    match err {
        LexnetError::Lookup(LookupError::MalformedSenseKey { field, .. }) => {
            assert_eq!(field, "ss_type");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sense_keys_resolve_including_satellites() {
    let (_dir, wn) = test_wordnet();
    assert_eq!(
        wn.synset_from_sense_key("dog%1:05:00::").unwrap().name(),
        "dog.n.01"
    );
    assert_eq!(
        wn.synset_from_sense_key("quick%5:00:00:fast:00")
            .unwrap()
            .offset(),
        203
    );
}

#[test]
fn index_and_data_are_consistent() {
    let (_dir, wn) = test_wordnet();
    for (_, pos, offsets) in wn.store().lemma_entries() {
        for &offset in offsets {
            wn.store().synset_by_id(pos, offset).unwrap();
        }
    }
}

#[test]
fn permissive_mode_repairs_inconsistent_index_lines() {
    let dir = tempfile::TempDir::new().unwrap();
    write_corpus(dir.path());
    // Overstated pointer count: strict parsing cannot segment the tail.
    let broken = format!("{INDEX_NOUN}cat n 1 2 @ 1 0 00000002\n");
    fs::write(dir.path().join("index.noun"), &broken).unwrap();

    let strict = WordNet::load(WordNetConfig::new(dir.path()));
    assert!(strict.is_err());

    let wn = WordNet::load(WordNetConfig::new(dir.path()).with_permissive_index(true)).unwrap();
    assert_eq!(wn.synset("cat.n.01").unwrap().offset(), 2);
}

#[test]
fn multilingual_lookup() {
    let (_dir, wn) = test_wordnet();
    assert!(wn.langs().contains(&"fra".to_string()));

    let hits = wn.synsets("chien", None, "fra").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "dog.n.01");

    let names = wn.synset_lemma_names(hits[0], "fra").unwrap();
    assert_eq!(names, ["chien", "chien_domestique"]);

    assert!(matches!(
        wn.synsets("hund", None, "deu").unwrap_err(),
        LexnetError::Lookup(LookupError::UnknownLanguage { .. })
    ));
}

#[test]
fn morphological_lookup_uses_exception_lists() {
    let (_dir, wn) = test_wordnet();
    assert_eq!(wn.morphy("ran", Some(PartOfSpeech::Verb)), Some("run".to_string()));

    let hits = wn.synsets("ran", Some(PartOfSpeech::Verb), "eng").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "run.v.01");

    // Rule-based detachment without an exception entry.
    let hits = wn.synsets("dogs", None, "eng").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "dog.n.01");
}

#[test]
fn lexicographer_file_names() {
    let (_dir, wn) = test_wordnet();
    let dog = wn.synset("dog.n.01").unwrap();
    assert_eq!(wn.lexname(dog), Some("noun.animal"));
    let car = wn.synset("car.n.01").unwrap();
    assert_eq!(wn.lexname(car), Some("noun.artifact"));
}

#[test]
fn verb_frames_survive_the_load() {
    let (_dir, wn) = test_wordnet();
    let run = wn.synset("run.v.01").unwrap();
    assert_eq!(run.frames(), [(2, 0)]);
}

#[test]
fn glosses_split_into_definition_and_examples() {
    let (_dir, wn) = test_wordnet();
    let dog = wn.synset("dog.n.01").unwrap();
    assert_eq!(dog.definition(), "a domesticated canine");
    assert_eq!(dog.examples(), ["the dog barked"]);
}

#[test]
fn closures_and_depths_from_the_facade() {
    let (_dir, wn) = test_wordnet();
    let dog = wn.synset("dog.n.01").unwrap();
    assert_eq!(wn.min_depth(dog).unwrap(), 3);
    assert_eq!(wn.max_depth(dog).unwrap(), 3);
    assert_eq!(wn.closure(dog, Relation::Hypernym, None).unwrap().len(), 4);
    assert_eq!(wn.hypernym_paths(dog).unwrap().len(), 2);

    let entity = wn.synset("entity.n.01").unwrap();
    assert_eq!(wn.root_hypernyms(dog).unwrap(), [entity.id()]);
}
