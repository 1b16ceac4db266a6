//! Integration tests for filtering and ranking.
//!
//! These build a catalog larger than the demo set and check that the
//! filters and rankers agree with each other.

use catalog::{Catalog, Genre, Movie, Rating, RatingValue, User};
use ranking::filters::{GenreFilter, YearFilter};
use ranking::{filter_movies, top_rated, top_rated_by_user, FilterPipeline, MovieQuery, TOP_RATED_LIMIT};

fn create_test_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.insert_genre(Genre { id: 1, name: "Action".to_string() });
    catalog.insert_genre(Genre { id: 2, name: "Drama".to_string() });

    let titles = [
        "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel",
    ];
    for (i, title) in titles.iter().enumerate() {
        let id = i as u32 + 1;
        catalog.insert_movie(Movie {
            id,
            title: title.to_string(),
            year_of_release: 2000 + (id as i32 % 3),
            running_time: 90 + id,
            genres: if id % 2 == 0 { vec![1] } else { vec![1, 2] },
        });
    }

    for id in 1..=4 {
        catalog.insert_user(User { id, name: format!("User {}", id) });
    }

    // Movies 1..=6 each get a 5 and a 4; movie 7 gets a single 5.
    for movie_id in 1..=6 {
        rate(&mut catalog, 1, movie_id, 5);
        rate(&mut catalog, 2, movie_id, 4);
    }
    rate(&mut catalog, 3, 7, 5);

    // User 4 rates three movies
    rate(&mut catalog, 4, 8, 2);
    rate(&mut catalog, 4, 2, 5);
    rate(&mut catalog, 4, 1, 5);

    catalog
}

fn rate(catalog: &mut Catalog, user_id: u32, movie_id: u32, value: i64) {
    catalog.upsert_rating(Rating {
        user_id,
        movie_id,
        value: RatingValue::new(value).unwrap(),
    });
}

#[test]
fn test_top_rated_is_sorted_and_bounded() {
    let catalog = create_test_catalog();
    let result = top_rated(&catalog, TOP_RATED_LIMIT);

    assert!(result.len() <= TOP_RATED_LIMIT);
    assert_eq!(result.len(), 5);
    assert_eq!(result[0].title, "Golf");

    for pair in result.windows(2) {
        assert!(
            pair[0].average_rating >= pair[1].average_rating,
            "Averages should be non-increasing"
        );
    }

    // Ties at the same average are broken alphabetically
    let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Golf", "Alpha", "Bravo", "Charlie", "Delta"]);
}

#[test]
fn test_top_rated_by_user_tie_break_and_overall_average() {
    let catalog = create_test_catalog();
    let result = top_rated_by_user(&catalog, 4, TOP_RATED_LIMIT);

    let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Bravo", "Hotel"]);

    // Alpha: 5, 4, 5 -> 4.67 -> 4.5
    assert_eq!(result[0].average_rating, 4.5);
    // Hotel only has user 4's rating
    assert_eq!(result[2].average_rating, 2.0);
}

#[test]
fn test_query_matches_manual_pipeline() {
    let catalog = create_test_catalog();

    let query = MovieQuery {
        year: Some(2001),
        genre: Some("Drama".to_string()),
        ..Default::default()
    };
    let from_query: Vec<u32> = filter_movies(&catalog, &query).iter().map(|m| m.id).collect();

    let pipeline = FilterPipeline::new()
        .add_filter(YearFilter::new(2001))
        .add_filter(GenreFilter::new("Drama"));
    let mut from_pipeline: Vec<u32> = pipeline
        .apply(catalog.movies().collect(), &catalog)
        .iter()
        .map(|m| m.id)
        .collect();
    from_pipeline.sort();

    assert_eq!(from_query, from_pipeline);
    assert_eq!(from_query, vec![1, 7]);
}

#[test]
fn test_rating_update_moves_ranking() {
    let mut catalog = create_test_catalog();

    // Drag Golf down below the 4.5 group
    rate(&mut catalog, 3, 7, 1);
    let result = top_rated(&catalog, TOP_RATED_LIMIT);
    assert!(result.iter().all(|m| m.title != "Golf"));
}
