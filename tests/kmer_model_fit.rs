//! Fitting the Poisson/Gaussian k-mer coverage mixture, on simulated data
//! and on a real coverage histogram from an assembly run.

use histfit::{models, LevenbergMarquardt};
use ndarray::{array, Array1};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[test]
fn test_simulated_kmer_model_fit() {
    // True params (mix, lambda, mean, stddev) = (0.86, 0.95, 100, 20),
    // x = 1..500, noise sigma = 1, initial guess (0.5, 1.0, 200, 50).
    let real_params = array![0.86, 0.95, 100.0, 20.0];

    let xs = Array1::from_iter((1..=500).map(|x| x as f64));
    let ys = models::kmer_coverage(&real_params, &xs).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(19);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let data: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .map(|(&x, &y)| (x, y + noise.sample(&mut rng)))
        .collect();

    let solver =
        LevenbergMarquardt::new(models::kmer_coverage, array![0.5, 1.0, 200.0, 50.0], &data)
            .unwrap();
    let fit = solver.evaluate().unwrap();

    for i in 0..4 {
        let lo = fit.params[i] - 3.0 * fit.standard_errors[i];
        let hi = fit.params[i] + 3.0 * fit.standard_errors[i];
        assert!(
            lo <= real_params[i] && real_params[i] <= hi,
            "param {} = {} not in [{}, {}]",
            i,
            real_params[i],
            lo,
            hi
        );
    }

    let chi_sq_dist = ChiSquared::new(fit.degrees_of_freedom as f64).unwrap();
    assert!(fit.chi_squared < chi_sq_dist.inverse_cdf(0.99));
}

#[test]
fn test_real_kmer_histogram_fit() {
    // Rescale the raw counts so the histogram mass matches the model's
    // normalisation (total mass 1000 over the retained bins).
    let total: u64 = KMER_HISTOGRAM.iter().map(|&(_, count)| count).sum();
    let scale = total as f64 / 1000.0 / 0.999;

    let data: Vec<(f64, f64)> = KMER_HISTOGRAM
        .iter()
        .map(|&(x, count)| (x as f64, count as f64 / scale))
        .collect();

    let solver =
        LevenbergMarquardt::new(models::kmer_coverage, array![0.8, 0.95, 150.0, 20.0], &data)
            .unwrap();
    let fit = solver.evaluate().unwrap();

    let chi_sq_dist = ChiSquared::new(fit.degrees_of_freedom as f64).unwrap();
    assert!(
        fit.chi_squared < chi_sq_dist.inverse_cdf(0.99),
        "chi-squared {:.1} too large for {} degrees of freedom",
        fit.chi_squared,
        fit.degrees_of_freedom
    );

    // The error-kmer component should dominate and the coverage peak should
    // sit near the histogram mode (around count 151).
    assert!(fit.params[0] > 0.5 && fit.params[0] < 1.0);
    assert!(fit.params[2] > 140.0 && fit.params[2] < 160.0);
}

/// A real k-mer coverage histogram from an assembly run: (coverage count,
/// number of distinct k-mers), truncated below count 2.
pub const KMER_HISTOGRAM: [(u64, u64); 266] = [
    (2, 2877282), (3, 496376), (4, 167942), (5, 82786), (6, 48588),
    (7, 32696), (8, 22300), (9, 16716), (10, 13008), (11, 10788),
    (12, 9002), (13, 7772), (14, 6646), (15, 5464), (16, 5402),
    (17, 4816), (18, 4178), (19, 4044), (20, 3892), (21, 3882),
    (22, 3924), (23, 4422), (24, 4156), (25, 4198), (26, 3918),
    (27, 4074), (28, 4098), (29, 4310), (30, 4808), (31, 4632),
    (32, 4894), (33, 5050), (34, 5110), (35, 5200), (36, 5369),
    (37, 5868), (38, 5976), (39, 5988), (40, 5788), (41, 6398),
    (42, 6516), (43, 6542), (44, 6966), (45, 7064), (46, 7210),
    (47, 7322), (48, 7284), (49, 7686), (50, 7772), (51, 7814),
    (52, 8212), (53, 8630), (54, 8956), (55, 9220), (56, 9412),
    (57, 9804), (58, 10350), (59, 10466), (60, 10760), (61, 10984),
    (62, 11598), (63, 11948), (64, 12336), (65, 12420), (66, 12724),
    (67, 13038), (68, 13526), (69, 13730), (70, 14300), (71, 14786),
    (72, 15178), (73, 15742), (74, 16332), (75, 16592), (76, 16916),
    (77, 18304), (78, 18844), (79, 19634), (80, 20120), (81, 20280),
    (82, 21022), (83, 20888), (84, 21774), (85, 22490), (86, 23008),
    (87, 23922), (88, 24386), (89, 25346), (90, 25906), (91, 27270),
    (92, 28268), (93, 28544), (94, 29382), (95, 30354), (96, 30792),
    (97, 31438), (98, 32006), (99, 33386), (100, 34346), (101, 34922),
    (102, 36206), (103, 36812), (104, 38293), (105, 38908), (106, 39844),
    (107, 40872), (108, 41332), (109, 42564), (110, 43158), (111, 44988),
    (112, 45482), (113, 46832), (114, 47514), (115, 48644), (116, 49908),
    (117, 52144), (118, 53896), (119, 55864), (120, 58022), (121, 58960),
    (122, 61424), (123, 62642), (124, 63666), (125, 65172), (126, 66798),
    (127, 68332), (128, 70408), (129, 72346), (130, 74340), (131, 77226),
    (132, 77526), (133, 79842), (134, 82602), (135, 82712), (136, 85562),
    (137, 87328), (138, 88464), (139, 89684), (140, 91290), (141, 92646),
    (142, 93096), (143, 95494), (144, 95434), (145, 96106), (146, 97572),
    (147, 97596), (148, 99410), (149, 98504), (150, 99806), (151, 99862),
    (152, 99900), (153, 99560), (154, 99352), (155, 99520), (156, 98584),
    (157, 98610), (158, 98852), (159, 96598), (160, 97306), (161, 95652),
    (162, 94974), (163, 94192), (164, 93756), (165, 91416), (166, 89538),
    (167, 89236), (168, 87508), (169, 86010), (170, 84512), (171, 83314),
    (172, 81222), (173, 79356), (174, 78802), (175, 76606), (176, 74876),
    (177, 73386), (178, 72476), (179, 70564), (180, 68810), (181, 67810),
    (182, 66160), (183, 64216), (184, 62060), (185, 60282), (186, 58486),
    (187, 56994), (188, 55620), (189, 53946), (190, 52586), (191, 50126),
    (192, 49294), (193, 47168), (194, 46376), (195, 44526), (196, 42512),
    (197, 41326), (198, 40592), (199, 39038), (200, 38196), (201, 37080),
    (202, 35586), (203, 34372), (204, 32878), (205, 32056), (206, 30774),
    (207, 29906), (208, 28798), (209, 27834), (210, 26350), (211, 25246),
    (212, 24056), (213, 22912), (214, 21950), (215, 21488), (216, 20772),
    (217, 20084), (218, 19250), (219, 18674), (220, 17552), (221, 17082),
    (222, 16338), (223, 15904), (224, 15200), (225, 14228), (226, 14028),
    (227, 13324), (228, 12586), (229, 11966), (230, 11630), (231, 11204),
    (232, 10370), (233, 9914), (234, 9534), (235, 9136), (236, 8722),
    (237, 8154), (238, 8030), (239, 7452), (240, 7084), (241, 6526),
    (242, 6574), (243, 6056), (244, 5730), (245, 5116), (246, 4964),
    (247, 4618), (248, 4266), (249, 4116), (250, 3832), (251, 3740),
    (252, 3644), (253, 3346), (254, 3226), (255, 3128), (256, 2908),
    (257, 2712), (258, 2552), (259, 2494), (260, 2262), (261, 2010),
    (262, 1776), (263, 1732), (264, 1622), (265, 1702), (266, 1470),
    (267, 1474),
];
