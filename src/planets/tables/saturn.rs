//! Abridged VSOP87D series for Saturn.
//!
//! Heliocentric ecliptic coordinates referred to the mean equinox of date.
//! Each row is `[A, B, C]` with `A` in units of 1e-8 rad (or 1e-8 AU for the
//! radius vector), evaluated as `A·cos(B + C·τ)`.

use super::Row;

pub(crate) const L: &[&[Row]] = &[L0, L1, L2, L3, L4, L5];

pub(crate) const B: &[&[Row]] = &[B0, B1, B2, B3, B4, B5];

pub(crate) const R: &[&[Row]] = &[R0, R1, R2, R3, R4, R5];

const L0: &[Row] = &[
    [87401354.0, 0.0, 0.0],
    [11107660.0, 3.9620509, 213.29909544],
    [1414151.0, 4.5858152, 7.113547],
    [398379.0, 0.52112, 206.185548],
    [350769.0, 3.303299, 426.598191],
    [206816.0, 0.246584, 103.092774],
    [79271.0, 3.84007, 220.41264],
    [23990.0, 4.66977, 110.20632],
    [16574.0, 0.43719, 419.48464],
    [15820.0, 0.93809, 632.78374],
    [15054.0, 2.7167, 639.89729],
    [14907.0, 5.76903, 316.39187],
    [14610.0, 1.56519, 3.93215],
    [13160.0, 4.44891, 14.22709],
    [13005.0, 5.98119, 11.0457],
    [10725.0, 3.1294, 202.2534],
    [6126.0, 1.7633, 277.035],
    [5863.0, 0.2366, 529.691],
    [5228.0, 4.2078, 3.1814],
    [5020.0, 3.1779, 433.7117],
    [4593.0, 0.6198, 199.072],
    [4006.0, 2.2448, 63.7359],
    [3874.0, 3.2228, 138.5175],
    [3269.0, 0.7749, 949.1756],
    [2954.0, 0.9828, 95.9792],
    [2461.0, 2.0316, 735.8765],
    [1758.0, 3.2658, 522.5774],
    [1640.0, 5.505, 846.0828],
    [1581.0, 4.3727, 309.2783],
    [1391.0, 4.0233, 323.5054],
    [1124.0, 2.8373, 415.5525],
    [1087.0, 4.1834, 2.4477],
    [1017.0, 3.717, 227.5262],
    [957.0, 0.507, 1265.567],
    [853.0, 3.421, 175.166],
    [849.0, 3.191, 209.367],
    [789.0, 5.007, 0.963],
    [749.0, 2.144, 853.196],
    [744.0, 5.253, 224.345],
    [687.0, 1.747, 1052.268],
    [654.0, 1.599, 0.048],
    [634.0, 2.299, 412.371],
    [625.0, 0.97, 210.118],
    [580.0, 3.093, 74.782],
    [546.0, 2.127, 350.332],
    [543.0, 1.518, 9.561],
    [530.0, 4.449, 117.32],
    [478.0, 2.965, 137.033],
    [474.0, 5.475, 742.99],
    [452.0, 1.044, 490.334],
    [449.0, 1.29, 127.472],
    [372.0, 2.278, 217.231],
    [355.0, 3.013, 838.969],
    [347.0, 1.539, 340.771],
    [343.0, 0.246, 0.521],
    [330.0, 0.247, 1581.959],
    [322.0, 0.961, 203.738],
    [322.0, 2.572, 647.011],
    [309.0, 3.495, 216.48],
    [287.0, 2.37, 351.817],
    [278.0, 0.4, 211.815],
    [249.0, 1.47, 1368.66],
    [227.0, 4.91, 12.53],
    [220.0, 4.204, 200.769],
    [209.0, 1.345, 625.67],
    [208.0, 0.483, 1162.475],
    [208.0, 1.283, 39.357],
    [204.0, 6.011, 265.989],
    [185.0, 3.503, 149.563],
    [184.0, 0.973, 4.193],
    [182.0, 5.491, 2.921],
    [174.0, 1.863, 0.751],
    [165.0, 0.44, 5.417],
    [149.0, 5.736, 52.69],
    [148.0, 1.535, 5.629],
    [146.0, 6.231, 195.14],
    [140.0, 4.295, 21.341],
    [131.0, 4.068, 10.295],
    [125.0, 6.277, 1898.351],
    [122.0, 1.976, 4.666],
    [118.0, 5.341, 554.07],
    [117.0, 2.679, 1155.361],
    [114.0, 5.594, 1059.382],
    [112.0, 1.105, 191.208],
    [110.0, 0.166, 1.484],
    [109.0, 3.438, 536.805],
    [107.0, 4.012, 956.289],
    [104.0, 2.192, 88.866],
    [103.0, 1.197, 1685.052],
    [101.0, 4.965, 269.921],
];

const L1: &[Row] = &[
    [21354295596.0, 0.0, 0.0],
    [1296855.0, 1.8282054, 213.2990954],
    [564348.0, 2.885001, 7.113547],
    [107679.0, 2.277699, 206.185548],
    [98323.0, 1.0807, 426.59819],
    [40255.0, 2.04128, 220.41264],
    [19942.0, 1.27955, 103.09277],
    [10512.0, 2.7488, 14.22709],
    [6939.0, 0.4049, 639.8973],
    [4803.0, 2.4419, 419.4846],
    [4056.0, 2.9217, 110.2063],
    [3769.0, 3.6497, 3.9322],
    [3385.0, 2.4169, 3.1814],
    [3302.0, 1.2626, 433.7117],
    [3071.0, 2.3274, 199.072],
    [1953.0, 3.5639, 11.0457],
    [1249.0, 2.628, 95.9792],
    [922.0, 1.961, 227.526],
    [706.0, 4.417, 529.691],
    [650.0, 6.174, 202.253],
    [628.0, 6.111, 309.278],
    [487.0, 6.04, 853.196],
    [479.0, 4.988, 522.577],
    [468.0, 4.617, 63.736],
    [417.0, 2.117, 323.505],
    [408.0, 1.299, 209.367],
    [352.0, 2.317, 632.784],
    [344.0, 3.959, 412.371],
    [340.0, 3.634, 316.392],
    [336.0, 3.772, 735.877],
    [332.0, 2.861, 210.118],
    [289.0, 2.733, 117.32],
    [281.0, 5.744, 2.448],
    [266.0, 0.543, 647.011],
    [230.0, 1.644, 216.48],
    [192.0, 2.965, 224.345],
    [173.0, 4.077, 846.083],
    [167.0, 2.597, 21.341],
    [136.0, 2.286, 10.295],
    [131.0, 3.441, 742.99],
    [128.0, 4.095, 217.231],
    [109.0, 6.161, 415.552],
    [98.0, 4.73, 838.97],
    [94.0, 3.48, 1052.27],
    [92.0, 3.95, 88.87],
    [87.0, 1.22, 440.83],
    [83.0, 3.11, 625.67],
    [78.0, 6.24, 302.16],
    [67.0, 0.29, 4.67],
    [66.0, 5.65, 9.56],
    [62.0, 4.29, 127.47],
    [62.0, 1.83, 195.14],
    [58.0, 2.48, 191.96],
    [57.0, 5.02, 137.03],
    [55.0, 0.28, 74.78],
    [54.0, 5.13, 490.33],
    [51.0, 1.46, 536.8],
    [47.0, 1.18, 149.56],
    [47.0, 5.15, 515.46],
    [46.0, 2.23, 956.29],
    [44.0, 2.71, 5.42],
    [40.0, 0.41, 269.92],
    [40.0, 3.89, 728.76],
    [38.0, 0.65, 422.67],
    [38.0, 2.53, 12.53],
    [37.0, 3.78, 2.92],
    [35.0, 6.08, 5.63],
    [34.0, 3.21, 1368.66],
    [33.0, 4.64, 277.03],
    [33.0, 5.43, 1066.5],
    [33.0, 0.3, 351.82],
    [32.0, 4.39, 1155.36],
    [31.0, 2.43, 52.69],
    [30.0, 2.84, 203.0],
    [30.0, 6.19, 284.15],
    [30.0, 3.39, 1059.38],
    [29.0, 2.03, 330.62],
    [28.0, 2.74, 265.99],
    [26.0, 4.51, 340.77],
];

const L2: &[Row] = &[
    [116441.0, 1.179879, 7.113547],
    [91921.0, 0.07425, 213.2991],
    [90592.0, 0.0, 0.0],
    [15277.0, 4.06492, 206.18555],
    [10631.0, 0.25778, 220.41264],
    [10605.0, 5.40964, 426.59819],
    [4265.0, 1.046, 14.2271],
    [1216.0, 2.9186, 103.0928],
    [1165.0, 4.6094, 639.8973],
    [1082.0, 5.6913, 433.7117],
    [1045.0, 4.0421, 199.072],
    [1020.0, 0.6337, 3.1814],
    [634.0, 4.388, 419.485],
    [549.0, 5.573, 3.932],
    [457.0, 1.268, 110.206],
    [425.0, 0.209, 227.526],
    [274.0, 4.288, 95.979],
    [162.0, 1.381, 11.046],
    [129.0, 1.566, 309.278],
    [117.0, 3.881, 853.196],
    [105.0, 4.9, 647.011],
    [101.0, 0.893, 21.341],
    [96.0, 2.91, 316.39],
    [95.0, 5.63, 412.37],
    [85.0, 5.73, 209.37],
    [83.0, 6.05, 216.48],
    [82.0, 1.02, 117.32],
    [75.0, 4.76, 210.12],
    [67.0, 0.46, 522.58],
    [66.0, 0.48, 10.29],
    [64.0, 0.35, 323.51],
    [61.0, 4.88, 632.78],
    [53.0, 2.75, 529.69],
    [46.0, 5.69, 440.83],
    [45.0, 1.67, 202.25],
    [42.0, 5.71, 88.87],
    [32.0, 0.07, 63.74],
    [32.0, 1.67, 302.16],
    [31.0, 4.16, 191.96],
    [27.0, 0.83, 224.34],
    [25.0, 5.66, 735.88],
    [20.0, 5.94, 217.23],
    [18.0, 4.9, 625.67],
    [17.0, 1.63, 742.99],
    [16.0, 0.58, 515.46],
    [14.0, 0.21, 838.97],
    [14.0, 3.76, 195.14],
    [12.0, 4.72, 203.0],
    [12.0, 0.13, 234.64],
    [12.0, 3.12, 846.08],
    [11.0, 5.92, 536.8],
    [11.0, 5.6, 728.76],
    [11.0, 3.2, 1066.5],
    [10.0, 4.99, 422.67],
    [10.0, 0.26, 330.62],
    [10.0, 4.15, 860.31],
    [9.0, 0.46, 956.29],
    [8.0, 2.14, 269.92],
    [8.0, 5.25, 429.78],
    [8.0, 4.03, 9.56],
    [7.0, 5.4, 1052.27],
    [6.0, 4.46, 284.15],
    [6.0, 5.93, 405.52],
];

const L3: &[Row] = &[
    [16039.0, 5.73945, 7.11355],
    [4250.0, 4.5854, 213.2991],
    [1907.0, 4.7608, 220.4126],
    [1466.0, 5.9133, 206.1855],
    [1162.0, 5.6197, 14.2271],
    [1067.0, 3.6082, 426.5982],
    [239.0, 3.861, 433.712],
    [237.0, 5.768, 199.072],
    [166.0, 5.116, 3.181],
    [151.0, 2.736, 639.897],
    [131.0, 4.743, 227.526],
    [63.0, 0.23, 419.48],
    [62.0, 4.74, 103.09],
    [40.0, 5.47, 21.34],
    [40.0, 5.96, 95.98],
    [39.0, 5.83, 110.21],
    [28.0, 3.01, 647.01],
    [25.0, 0.99, 3.93],
    [19.0, 1.92, 853.2],
    [18.0, 4.97, 10.29],
    [18.0, 1.03, 412.37],
    [18.0, 4.2, 216.48],
    [18.0, 3.32, 309.28],
    [16.0, 3.9, 440.83],
    [16.0, 5.62, 117.32],
    [13.0, 1.18, 88.87],
    [11.0, 5.58, 11.05],
    [11.0, 5.93, 191.96],
    [10.0, 3.95, 209.37],
    [9.0, 3.39, 302.16],
    [8.0, 4.88, 323.51],
    [7.0, 0.38, 632.78],
    [6.0, 2.25, 522.58],
    [6.0, 1.06, 210.12],
    [5.0, 4.64, 234.64],
    [4.0, 3.14, 0.0],
    [4.0, 2.31, 515.46],
    [3.0, 2.2, 860.31],
    [3.0, 0.59, 529.69],
    [3.0, 4.93, 224.34],
    [3.0, 0.42, 625.67],
    [2.0, 4.77, 330.62],
    [2.0, 3.35, 429.78],
    [2.0, 3.2, 202.25],
    [2.0, 1.19, 1066.5],
    [2.0, 1.35, 405.52],
    [2.0, 4.16, 223.59],
    [2.0, 3.07, 654.12],
];

const L4: &[Row] = &[
    [1662.0, 3.9983, 7.1135],
    [257.0, 2.984, 220.413],
    [236.0, 3.902, 14.227],
    [149.0, 2.741, 213.299],
    [114.0, 3.142, 0.0],
    [110.0, 1.515, 206.186],
    [68.0, 1.72, 426.6],
    [40.0, 2.05, 433.71],
    [38.0, 1.24, 199.07],
    [31.0, 3.01, 227.53],
    [15.0, 0.83, 639.9],
    [9.0, 3.71, 21.34],
    [6.0, 2.42, 419.48],
    [6.0, 1.16, 647.01],
    [4.0, 1.45, 95.98],
    [4.0, 2.12, 440.83],
    [3.0, 4.09, 110.21],
    [3.0, 2.77, 412.37],
    [3.0, 3.01, 88.87],
    [3.0, 0.0, 853.2],
    [3.0, 0.39, 103.09],
    [2.0, 3.78, 117.32],
    [2.0, 2.83, 234.64],
    [2.0, 5.08, 309.28],
    [2.0, 2.24, 216.48],
    [2.0, 5.19, 302.16],
    [1.0, 1.55, 191.96],
];

const L5: &[Row] = &[
    [124.0, 2.259, 7.114],
    [34.0, 2.16, 14.23],
    [28.0, 1.2, 220.41],
    [6.0, 1.22, 227.53],
    [5.0, 0.24, 433.71],
    [4.0, 6.23, 426.6],
    [3.0, 2.97, 199.07],
    [3.0, 4.29, 206.19],
    [2.0, 6.25, 213.3],
    [1.0, 5.28, 639.9],
    [1.0, 0.24, 440.83],
    [1.0, 3.14, 0.0],
];

const B0: &[Row] = &[
    [4330678.0, 3.6028443, 213.2990954],
    [240348.0, 2.852385, 426.598191],
    [84746.0, 0.0, 0.0],
    [34116.0, 0.57297, 206.18555],
    [30863.0, 3.48442, 220.41264],
    [14734.0, 2.11847, 639.89729],
    [9917.0, 5.79, 419.4846],
    [6994.0, 4.736, 7.1135],
    [4808.0, 5.4331, 316.3919],
    [4788.0, 4.9651, 110.2063],
    [3432.0, 2.7326, 433.7117],
    [1506.0, 6.013, 103.0928],
    [1060.0, 5.631, 529.691],
    [969.0, 5.204, 632.784],
    [942.0, 1.396, 853.196],
    [708.0, 3.803, 323.505],
    [552.0, 5.131, 202.253],
    [400.0, 3.359, 227.526],
    [319.0, 3.626, 209.367],
    [316.0, 1.997, 647.011],
    [314.0, 0.465, 217.231],
    [284.0, 4.886, 224.345],
    [236.0, 2.139, 11.046],
    [215.0, 5.95, 846.083],
    [209.0, 2.12, 415.552],
    [207.0, 0.73, 199.072],
    [179.0, 2.954, 63.736],
    [141.0, 0.644, 490.334],
    [139.0, 4.595, 14.227],
    [139.0, 1.998, 735.877],
    [135.0, 5.245, 742.99],
    [122.0, 3.115, 522.577],
    [116.0, 3.109, 216.48],
    [114.0, 0.963, 210.118],
];

const B1: &[Row] = &[
    [397555.0, 5.3329, 213.299095],
    [49479.0, 3.14159, 0.0],
    [18572.0, 6.09919, 426.59819],
    [14801.0, 2.30586, 206.18555],
    [9644.0, 1.6967, 220.4126],
    [3757.0, 1.2543, 419.4846],
    [2717.0, 5.9117, 639.8973],
    [1455.0, 0.8516, 433.7117],
    [1291.0, 2.9177, 7.1135],
    [853.0, 0.436, 316.392],
    [298.0, 0.919, 632.784],
    [292.0, 5.316, 853.196],
    [284.0, 1.619, 227.526],
    [275.0, 3.889, 103.093],
    [172.0, 0.052, 647.011],
    [166.0, 2.444, 199.072],
    [158.0, 5.209, 110.206],
    [128.0, 1.207, 529.691],
    [110.0, 2.457, 217.231],
    [82.0, 2.76, 210.12],
    [81.0, 2.86, 14.23],
    [69.0, 1.66, 202.25],
    [65.0, 1.26, 216.48],
    [61.0, 1.25, 209.37],
    [59.0, 1.82, 323.51],
    [46.0, 0.82, 440.83],
    [36.0, 1.82, 224.34],
    [34.0, 2.84, 117.32],
    [33.0, 1.31, 412.37],
    [32.0, 1.19, 846.08],
    [27.0, 4.65, 1066.5],
    [27.0, 4.44, 11.05],
];

const B2: &[Row] = &[
    [20630.0, 0.50482, 213.2991],
    [3720.0, 3.9983, 206.1855],
    [1627.0, 6.1819, 220.4126],
    [1346.0, 0.0, 0.0],
    [706.0, 3.039, 419.485],
    [365.0, 5.099, 426.598],
    [330.0, 5.279, 433.712],
    [219.0, 3.828, 639.897],
    [139.0, 1.043, 7.114],
    [104.0, 6.157, 227.526],
    [93.0, 1.98, 316.39],
    [71.0, 4.15, 199.07],
    [52.0, 2.88, 632.78],
    [49.0, 4.43, 647.01],
    [41.0, 3.16, 853.2],
    [29.0, 4.53, 210.12],
    [24.0, 1.12, 14.23],
    [21.0, 4.35, 217.23],
    [20.0, 5.31, 440.83],
    [18.0, 0.85, 110.21],
    [17.0, 5.68, 216.48],
    [16.0, 4.26, 103.09],
    [14.0, 3.0, 412.37],
    [12.0, 2.53, 529.69],
    [8.0, 3.32, 202.25],
    [7.0, 5.56, 209.37],
    [7.0, 0.29, 323.51],
    [6.0, 1.16, 117.32],
    [6.0, 3.61, 860.31],
];

const B3: &[Row] = &[
    [666.0, 1.99, 213.299],
    [632.0, 5.698, 206.186],
    [398.0, 0.0, 0.0],
    [188.0, 4.338, 220.413],
    [92.0, 4.84, 419.48],
    [52.0, 3.42, 433.71],
    [42.0, 2.38, 426.6],
    [26.0, 4.4, 227.53],
    [21.0, 5.85, 199.07],
    [18.0, 1.99, 639.9],
    [11.0, 5.37, 7.11],
    [10.0, 2.55, 647.01],
    [7.0, 3.46, 316.39],
    [6.0, 4.8, 632.78],
    [6.0, 0.02, 210.12],
    [6.0, 3.52, 440.83],
    [5.0, 5.64, 14.23],
    [5.0, 1.22, 853.2],
    [4.0, 4.71, 412.37],
    [3.0, 0.63, 103.09],
    [2.0, 3.72, 216.48],
];

const B4: &[Row] = &[
    [80.0, 1.12, 206.19],
    [32.0, 3.12, 213.3],
    [17.0, 2.48, 220.41],
    [12.0, 3.14, 0.0],
    [9.0, 0.38, 419.48],
    [6.0, 1.56, 433.71],
    [5.0, 2.63, 227.53],
    [5.0, 1.28, 199.07],
    [1.0, 1.43, 426.6],
    [1.0, 0.67, 647.01],
    [1.0, 1.72, 440.83],
    [1.0, 6.18, 639.9],
];

const B5: &[Row] = &[
    [8.0, 2.82, 206.19],
    [1.0, 0.51, 220.41],
];

const R0: &[Row] = &[
    [955758136.0, 0.0, 0.0],
    [52921382.0, 2.3922622, 213.29909544],
    [1873680.0, 5.2354961, 206.1855484],
    [1464664.0, 1.6476305, 426.5981909],
    [821891.0, 5.9352, 316.39187],
    [547507.0, 5.015326, 103.092774],
    [371684.0, 2.271148, 220.412642],
    [361778.0, 3.139043, 7.113547],
    [140618.0, 5.704067, 632.783739],
    [108975.0, 3.293136, 110.206321],
    [69007.0, 5.941, 419.48464],
    [61053.0, 0.94038, 639.89729],
    [48913.0, 1.55733, 202.2534],
    [34144.0, 0.19519, 277.03499],
    [32402.0, 5.47085, 949.17561],
    [20937.0, 0.46349, 735.87651],
    [20839.0, 1.52103, 433.71174],
    [20747.0, 5.33256, 199.072],
    [15298.0, 3.05944, 529.69097],
    [14296.0, 2.60434, 323.50542],
    [12884.0, 1.64892, 138.5175],
    [11993.0, 5.98051, 846.08283],
    [11380.0, 1.73106, 522.57742],
    [9796.0, 5.2048, 1265.5675],
    [7753.0, 5.8519, 95.9792],
    [6771.0, 3.0043, 14.2271],
    [6466.0, 0.1773, 1052.2684],
    [5850.0, 1.4552, 415.5525],
    [5307.0, 0.5974, 63.7359],
    [4696.0, 2.1492, 227.5262],
    [4044.0, 1.6401, 209.3669],
    [3688.0, 0.7802, 412.3711],
    [3461.0, 1.8509, 175.1661],
    [3420.0, 4.9455, 1581.9593],
    [3401.0, 0.5539, 350.3321],
    [3376.0, 3.6953, 224.3448],
    [3303.0, 5.9324, 853.1964],
    [3089.0, 4.0883, 351.8166],
    [2938.0, 1.6464, 1368.6603],
    [2855.0, 1.1764, 1478.8666],
    [2830.0, 5.486, 309.2783],
    [2567.0, 4.5628, 490.3341],
    [2469.0, 4.7328, 742.9901],
    [2419.0, 1.895, 440.8253],
    [2322.0, 0.1963, 1162.4747],
    [2274.0, 3.2592, 149.5632],
];

const R1: &[Row] = &[
    [6182981.0, 0.2584352, 213.2990954],
    [506578.0, 0.711147, 206.185548],
    [341394.0, 5.796358, 426.598191],
    [188491.0, 0.472157, 220.412642],
    [186262.0, 3.141593, 0.0],
    [143891.0, 1.407449, 7.113547],
    [49621.0, 6.01744, 103.09277],
    [20928.0, 5.09246, 639.89729],
    [19953.0, 1.1756, 419.48464],
    [18840.0, 1.6082, 110.20632],
    [13877.0, 0.75886, 199.072],
    [12893.0, 5.9433, 433.71174],
    [5397.0, 1.2885, 14.2271],
    [4869.0, 0.8679, 323.5054],
    [4247.0, 0.393, 227.5262],
    [3252.0, 1.2585, 95.9792],
    [3081.0, 3.4366, 522.5774],
    [2909.0, 4.6068, 202.2534],
    [2856.0, 2.1673, 735.8765],
    [1988.0, 2.4505, 412.3711],
    [1941.0, 6.0239, 209.3669],
    [1581.0, 1.2919, 210.1177],
    [1340.0, 4.308, 853.1964],
    [1316.0, 1.253, 117.3199],
    [1203.0, 1.8665, 316.3919],
    [1091.0, 0.0753, 216.4805],
    [966.0, 0.48, 632.784],
    [954.0, 5.152, 647.011],
    [898.0, 0.983, 529.691],
    [882.0, 1.885, 1052.268],
    [874.0, 1.402, 224.345],
    [785.0, 3.064, 838.969],
    [740.0, 1.382, 625.67],
    [658.0, 4.144, 309.278],
    [650.0, 1.725, 742.99],
    [613.0, 3.033, 63.736],
    [599.0, 2.549, 217.231],
    [503.0, 2.13, 3.932],
];

const R2: &[Row] = &[
    [436902.0, 4.786717, 213.299095],
    [71923.0, 2.5007, 206.18555],
    [49767.0, 4.97168, 220.41264],
    [43221.0, 3.8694, 426.59819],
    [29646.0, 5.9631, 7.11355],
    [4721.0, 2.4753, 199.072],
    [4142.0, 4.1067, 433.7117],
    [3789.0, 3.0977, 639.8973],
    [2964.0, 1.3721, 103.0928],
    [2556.0, 2.8507, 419.4846],
    [2327.0, 0.0, 0.0],
    [2208.0, 6.2759, 110.2063],
    [2188.0, 5.8555, 14.2271],
    [1957.0, 4.9245, 227.5262],
    [924.0, 5.464, 323.505],
    [706.0, 2.971, 95.979],
    [546.0, 4.129, 412.371],
    [431.0, 5.178, 522.577],
    [405.0, 4.173, 209.367],
    [391.0, 4.481, 216.48],
    [374.0, 5.834, 117.32],
    [361.0, 3.277, 647.011],
    [356.0, 3.192, 210.118],
    [326.0, 2.269, 853.196],
    [207.0, 4.022, 735.877],
    [204.0, 0.088, 202.253],
    [180.0, 3.597, 632.784],
    [178.0, 4.097, 440.825],
    [154.0, 3.135, 625.67],
    [148.0, 0.136, 302.165],
    [133.0, 2.594, 191.958],
    [132.0, 5.933, 309.278],
];

const R3: &[Row] = &[
    [20315.0, 3.02187, 213.2991],
    [8924.0, 3.1914, 220.4126],
    [6909.0, 4.3517, 206.1855],
    [4087.0, 4.2241, 7.1135],
    [3879.0, 2.0106, 426.5982],
    [1071.0, 4.2036, 199.072],
    [907.0, 2.283, 433.712],
    [606.0, 3.175, 227.526],
    [597.0, 4.135, 14.227],
    [483.0, 1.173, 639.897],
    [393.0, 0.0, 0.0],
    [229.0, 4.698, 419.485],
    [188.0, 4.59, 110.206],
    [150.0, 3.202, 103.093],
    [121.0, 3.768, 323.505],
    [102.0, 4.71, 95.979],
    [101.0, 5.819, 412.371],
    [93.0, 1.44, 647.01],
    [84.0, 2.63, 216.48],
    [73.0, 4.15, 117.32],
    [62.0, 2.31, 440.83],
    [55.0, 0.31, 853.2],
    [50.0, 2.39, 209.37],
    [45.0, 4.37, 191.96],
    [41.0, 0.69, 522.58],
    [40.0, 1.84, 302.16],
    [38.0, 5.94, 88.87],
    [32.0, 4.01, 21.34],
];

const R4: &[Row] = &[
    [1202.0, 1.415, 220.4126],
    [708.0, 1.162, 213.299],
    [516.0, 6.24, 206.186],
    [427.0, 2.469, 7.114],
    [268.0, 0.187, 426.598],
    [170.0, 5.959, 199.072],
    [150.0, 0.48, 433.712],
    [145.0, 1.442, 227.526],
    [121.0, 2.405, 14.227],
    [47.0, 5.57, 639.9],
    [19.0, 5.86, 647.01],
    [17.0, 0.53, 440.83],
    [16.0, 2.9, 110.21],
    [15.0, 0.3, 419.48],
    [14.0, 1.3, 412.37],
    [13.0, 2.09, 323.51],
    [11.0, 0.22, 95.98],
    [11.0, 2.46, 117.32],
    [10.0, 3.14, 0.0],
    [9.0, 1.56, 88.87],
    [9.0, 2.28, 21.34],
    [9.0, 0.68, 216.48],
    [8.0, 1.27, 234.64],
];

const R5: &[Row] = &[
    [129.0, 5.913, 220.413],
    [32.0, 0.69, 7.11],
    [27.0, 5.91, 227.53],
    [20.0, 4.95, 433.71],
    [20.0, 0.67, 14.23],
    [14.0, 2.67, 206.19],
    [14.0, 1.46, 199.07],
    [13.0, 4.59, 426.6],
    [7.0, 4.63, 213.3],
    [5.0, 3.61, 639.9],
    [4.0, 4.9, 440.83],
    [3.0, 4.07, 647.01],
    [3.0, 4.66, 191.96],
    [3.0, 0.49, 323.51],
    [3.0, 3.18, 419.48],
    [2.0, 3.7, 88.87],
    [2.0, 3.32, 95.98],
    [2.0, 0.56, 117.32],
];
