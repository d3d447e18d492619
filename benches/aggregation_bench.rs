use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use story_rs::api::{StoryConfig, StoryEngine};
use story_rs::core::{
    ContentType, CountryExclusions, Dataset, Row, YearWindow, load_dataset_from_reader,
    stack_by_category, top_countries, yearly_by_category, yearly_totals,
};
use story_rs::render::NullRenderer;

const COUNTRIES: [&str; 8] = [
    "United States",
    "India",
    "United Kingdom, United States",
    "Japan",
    "South Korea",
    "",
    "Spain, France",
    "Brazil",
];

fn synthetic_dataset(len: usize) -> Dataset {
    (0..len)
        .map(|i| {
            let kind = if i % 3 == 0 {
                ContentType::TvShow
            } else {
                ContentType::Movie
            };
            Row::new(1995 + (i % 30) as i32, kind, COUNTRIES[i % COUNTRIES.len()])
        })
        .collect::<Vec<_>>()
        .into()
}

fn bench_aggregations_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);
    let window = YearWindow::default();
    let exclusions = CountryExclusions::default();

    c.bench_function("yearly_totals_10k", |b| {
        b.iter(|| {
            let rows = dataset.filtered(black_box(window));
            let _ = yearly_totals(&rows);
        })
    });

    c.bench_function("yearly_by_category_stacked_10k", |b| {
        b.iter(|| {
            let rows = dataset.filtered(black_box(window));
            let counts = yearly_by_category(&rows);
            let _ = stack_by_category(&counts);
        })
    });

    c.bench_function("top_countries_10k", |b| {
        b.iter(|| {
            let rows = dataset.filtered(black_box(window));
            let _ = top_countries(&rows, &exclusions, black_box(10));
        })
    });
}

fn bench_csv_load_5k(c: &mut Criterion) {
    let mut csv = String::from("show_id,type,title,country,release_year\n");
    for i in 0..5_000 {
        let kind = if i % 2 == 0 { "Movie" } else { "TV Show" };
        let country = COUNTRIES[i % COUNTRIES.len()];
        csv.push_str(&format!(
            "s{i},{kind},Title {i},\"{country}\",{}\n",
            2000 + i % 22
        ));
    }

    c.bench_function("csv_load_5k", |b| {
        b.iter(|| {
            let _ = load_dataset_from_reader(black_box(csv.as_bytes()), "bench")
                .expect("synthetic csv should load");
        })
    });
}

fn bench_story_walkthrough_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);

    c.bench_function("story_walkthrough_10k", |b| {
        b.iter(|| {
            let mut engine = StoryEngine::new(
                NullRenderer::default(),
                dataset.clone(),
                StoryConfig::default(),
            )
            .expect("engine init");
            engine.render().expect("render");
            engine.next().expect("next");
            engine.click_year_bar(2016).expect("click");
            engine.set_all_time(true).expect("toggle");
            let _ = black_box(engine.snapshot());
        })
    });
}

criterion_group!(
    benches,
    bench_aggregations_10k,
    bench_csv_load_5k,
    bench_story_walkthrough_10k
);
criterion_main!(benches);
