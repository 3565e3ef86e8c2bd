use reversi::transport::tcp::TcpTransport;
use reversi::transport::{is_disconnect, Transport};
use reversi::{
    serve_tcp, GameApi, GameEngine, Message, MoveError, Player, Position, Skeleton, Stub,
    PROTOCOL_VERSION,
};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn test_tcp_frames_roundtrip() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(stream);
        let msg = transport.recv().await.unwrap();
        transport.send(msg).await.unwrap();
    });

    let mut client = TcpTransport::connect(addr).await?;
    let request = Message::MakeMove {
        seq: 7,
        position: Position::new(2, 3),
    };
    client.send(request.clone()).await?;
    assert_eq!(client.recv().await?, request);

    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_serve_tcp_plays_a_game() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(serve_tcp(listener));

    let mut stub = Stub::new(TcpTransport::connect(addr).await?);
    stub.make_move(Position::new(0, 1)).await?;
    stub.make_move(Position::new(0, 2)).await?;
    stub.make_move(Position::new(2, 3)).await?;
    let state = stub.make_move(Position::new(0, 0)).await?;

    // Black is stuck, White keeps the turn.
    assert_eq!(state.current_turn, Player::White);
    assert_eq!((state.black_score, state.white_score), (5, 3));
    assert!(!state.game_over);

    let err = stub.make_move(Position::new(1, 1)).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<MoveError>(),
        Some(&MoveError::Occupied { row: 1, col: 1 })
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_serve_tcp_isolates_clients() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(serve_tcp(listener));

    let mut first = Stub::new(TcpTransport::connect(addr).await?);
    let mut second = Stub::new(TcpTransport::connect(addr).await?);

    first.make_move(Position::new(1, 0)).await?;
    let other = second.get_board_state().await?;
    assert_eq!(other.board.occupied(), 4);
    assert_eq!(other.current_turn, Player::Black);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_length_frame_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.write_all(&0u32.to_be_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut client = TcpTransport::connect(addr).await?;
    let result = client.recv().await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_oversized_frame_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.write_all(&u32::MAX.to_be_bytes()).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut client = TcpTransport::connect(addr).await?;
    let err = client.recv().await.unwrap_err();
    assert!(err.to_string().contains("too large"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_garbage_payload_rejected() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let garbage = [0xffu8; 8];
        stream.write_all(&(garbage.len() as u32).to_be_bytes()).await.unwrap();
        stream.write_all(&garbage).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut client = TcpTransport::connect(addr).await?;
    assert!(client.recv().await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_recv_times_out() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (_stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
    });

    let mut client = TcpTransport::connect_timeout(addr, Duration::from_millis(100)).await?;
    let err = client.recv().await.unwrap_err();
    assert!(err.to_string().contains("timeout"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_peer_close_reported() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(stream);
        let _ = transport.recv().await;
    });

    let mut client = TcpTransport::connect(addr).await?;
    client
        .send(Message::Handshake {
            version: PROTOCOL_VERSION,
        })
        .await?;
    let err = client.recv().await.unwrap_err();
    assert!(is_disconnect(&err));
    assert!(err.to_string().contains("closed") || err.to_string().contains("reset"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skeleton_ends_cleanly_on_hang_up() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let host = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        Skeleton::new(GameEngine::new(), TcpTransport::new(stream))
            .run()
            .await
    });

    let mut stub = Stub::new(TcpTransport::connect(addr).await?);
    stub.get_board_state().await?;
    drop(stub);

    assert!(host.await?.is_ok());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skeleton_reports_garbage_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let host = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        Skeleton::new(GameEngine::new(), TcpTransport::new(stream))
            .run()
            .await
    });

    let mut raw = TcpStream::connect(addr).await?;
    let hello = bincode::serialize(&Message::Handshake {
        version: PROTOCOL_VERSION,
    })?;
    raw.write_all(&(hello.len() as u32).to_be_bytes()).await?;
    raw.write_all(&hello).await?;

    let garbage = [0xffu8; 8];
    raw.write_all(&(garbage.len() as u32).to_be_bytes()).await?;
    raw.write_all(&garbage).await?;
    raw.flush().await?;

    let err = host.await?.unwrap_err();
    assert!(!is_disconnect(&err));
    assert!(err.to_string().contains("Deserialization error"));
    Ok(())
}
