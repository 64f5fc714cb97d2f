use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use mosaicart::config::{DEFAULT_ENDPOINT, ENDPOINT_ENV, TIMEOUT_ENV};
use mosaicart::request::{MAX_TILES, MIN_TILES};
use mosaicart::{
  ColorGroup, Error, FormUpdate, MosaicConfig, MosaicForm,
  MosaicResponse, SessionState
};

fn sample_mosaic() -> MosaicResponse
{   MosaicResponse
    {   mosaic_url: "http://x/y.png".to_string()
      , album_name: "Abbey Road".to_string()
      , artist_name: Some("The Beatles".to_string())
    }
}

fn filled_state() -> SessionState
{   let mut state = SessionState::default();
    state.update_form(FormUpdate::AlbumName("Abbey Road".to_string()));
    state.update_form(FormUpdate::Artist("The Beatles".to_string()));
    state.update_form(FormUpdate::Red(200));
    state
}

// ===== Form =====

#[test]
fn test_form_defaults()
{   let form = MosaicForm::default();
    assert_eq!(form.album_name, "");
    assert_eq!(form.artist, "");
    assert_eq!((form.red, form.green, form.blue), (0, 0, 0));
    assert_eq!(form.color_group, ColorGroup::Analogous);
    assert_eq!((form.x_tiles(), form.y_tiles()), (50, 50));
}

#[test]
fn test_form_clamps_tile_counts()
{   let mut form = MosaicForm::default();
    form.apply(FormUpdate::XTiles(0));
    form.apply(FormUpdate::YTiles(10_000));
    assert_eq!(form.x_tiles(), MIN_TILES);
    assert_eq!(form.y_tiles(), MAX_TILES);

    form.set_x_tiles(250);
    assert_eq!(form.to_request().x_tiles, 250);
}

#[test]
fn test_request_uses_camel_case_keys()
{   let mut form = MosaicForm::default();
    form.apply(FormUpdate::AlbumName("Blue".to_string()));
    form.apply(FormUpdate::ColorGroup(ColorGroup::Monochrome));

    let body = assert_ok!(serde_json::to_value(form.to_request()));
    assert_eq!(body, json!({
      "albumName": "Blue",
      "artist": "",
      "red": 0,
      "green": 0,
      "blue": 0,
      "colorGroup": "monochrome",
      "xTiles": 50,
      "yTiles": 50
    }));
}

#[test]
fn test_form_update_parse()
{   assert_eq!(
      assert_ok!(FormUpdate::parse("albumName", "Let It Be")),
      FormUpdate::AlbumName("Let It Be".to_string())
    );
    assert_eq!(
      assert_ok!(FormUpdate::parse("green", " 128 ")),
      FormUpdate::Green(128)
    );
    assert_eq!(
      assert_ok!(FormUpdate::parse("colorGroup", "Complementary")),
      FormUpdate::ColorGroup(ColorGroup::Complementary)
    );
    assert_eq!(
      assert_ok!(FormUpdate::parse("yTiles", "500")),
      FormUpdate::YTiles(500)
    );
}

#[test]
fn test_form_update_parse_rejects_bad_input()
{   assert_eq!(
      FormUpdate::parse("red", "256"),
      Err(Error::InvalidField
      {   field: "red".to_string()
        , value: "256".to_string()
      })
    );
    assert_eq!(
      FormUpdate::parse("colorGroup", "neon"),
      Err(Error::InvalidField
      {   field: "colorGroup".to_string()
        , value: "neon".to_string()
      })
    );
    assert_eq!(
      FormUpdate::parse("tiles", "4"),
      Err(Error::UnknownField("tiles".to_string()))
    );
}

#[test]
fn test_form_update_parse_pair()
{   assert_eq!(
      assert_ok!(FormUpdate::parse_pair("albumName=A=B")),
      FormUpdate::AlbumName("A=B".to_string())
    );
    assert_eq!(
      assert_ok!(FormUpdate::parse_pair("xTiles=120")),
      FormUpdate::XTiles(120)
    );
    assert_eq!(
      FormUpdate::parse_pair("albumName"),
      Err(Error::UnknownField("albumName".to_string()))
    );
    assert_eq!(
      FormUpdate::parse_pair("blue=lots"),
      Err(Error::InvalidField
      {   field: "blue".to_string()
        , value: "lots".to_string()
      })
    );
}

#[test]
fn test_color_group_round_trips_its_name()
{   for group in ColorGroup::ALL
    {   let parsed: ColorGroup = assert_ok!(group.to_string().parse());
        assert_eq!(parsed, group);
    }
}

// ===== Response =====

#[test]
fn test_response_decodes_snake_case()
{   let mosaic: MosaicResponse = assert_ok!(serde_json::from_value(json!({
      "mosaic_url": "http://x/y.png",
      "album_name": "Abbey Road",
      "artist_name": "The Beatles"
    })));
    assert_eq!(mosaic, sample_mosaic());

    let missing: Result<MosaicResponse, _>
      = serde_json::from_value(json!({ "album_name": "Abbey Road" }));
    assert_err!(missing);
}

// ===== SessionState =====

#[test]
fn test_begin_submit_sets_loading_and_captures_form()
{   let mut state = filled_state();
    let submission = assert_ok!(state.begin_submit());
    assert!(state.loading);
    assert_eq!(submission.request.album_name, "Abbey Road");
    assert_eq!(submission.request.red, 200);
}

#[test]
fn test_begin_submit_rejects_while_loading()
{   let mut state = filled_state();
    assert_ok!(state.begin_submit());
    assert_eq!(state.begin_submit(), Err(Error::SubmissionInFlight));
    assert!(state.loading);
}

#[test]
fn test_finish_submit_success_replaces_result()
{   let mut state = filled_state();
    state.result = Some(MosaicResponse
    {   mosaic_url: "http://x/old.png".to_string()
      , album_name: "Help!".to_string()
      , artist_name: None
    });

    let submission = assert_ok!(state.begin_submit());
    state.finish_submit(submission.generation, &Ok(sample_mosaic()));
    assert!(!state.loading);
    assert_eq!(state.result, Some(sample_mosaic()));
}

#[test]
fn test_finish_submit_failure_leaves_state_alone()
{   let mut state = filled_state();
    state.result = Some(sample_mosaic());
    let before = state.clone();

    let submission = assert_ok!(state.begin_submit());
    state.finish_submit(
      submission.generation,
      &Err(Error::InvalidData("bad".to_string()))
    );
    assert_eq!(state, before);
}

#[test]
fn test_reset_clears_result_and_album_name_only()
{   let mut state = filled_state();
    state.result = Some(sample_mosaic());

    state.reset();
    assert!(!state.has_result());
    assert_eq!(state.form.album_name, "");
    assert_eq!(state.form.artist, "The Beatles");
    assert_eq!(state.form.red, 200);
}

#[test]
fn test_mosaic_finished_after_reset_is_dropped()
{   let mut state = filled_state();
    state.result = Some(sample_mosaic());

    let submission = assert_ok!(state.begin_submit());
    state.reset();
    assert!(state.loading);

    state.finish_submit(submission.generation, &Ok(sample_mosaic()));
    assert!(!state.loading);
    assert_eq!(state.result, None);

    let next = assert_ok!(state.begin_submit());
    state.finish_submit(next.generation, &Ok(sample_mosaic()));
    assert_eq!(state.result, Some(sample_mosaic()));
}

// ===== Config and errors =====

#[test]
fn test_config_defaults_and_env()
{   let config = MosaicConfig::default();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.timeout_secs, None);

    std::env::set_var(ENDPOINT_ENV, "http://mosaic.local/AlbumCoverMosaic");
    std::env::set_var(TIMEOUT_ENV, "15");
    let config = MosaicConfig::from_env();
    std::env::remove_var(ENDPOINT_ENV);
    std::env::remove_var(TIMEOUT_ENV);

    assert_eq!(config.endpoint, "http://mosaic.local/AlbumCoverMosaic");
    assert_eq!(config.timeout_secs, Some(15));
}

#[test]
fn test_config_from_json()
{   let config: MosaicConfig = assert_ok!(serde_json::from_str(
      r#"{ "endpoint": "http://10.0.0.2:5000/AlbumCoverMosaic" }"#
    ));
    assert_eq!(
      config,
      MosaicConfig::with_endpoint("http://10.0.0.2:5000/AlbumCoverMosaic")
    );
}

#[test]
fn test_error_display()
{   assert_eq!(
      Error::InvalidResponse(404).to_string(),
      "Invalid response: HTTP status 404"
    );
    assert_eq!(
      Error::from("session gone"),
      Error::Other("session gone".to_string())
    );
}
